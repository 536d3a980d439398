//! Audio object storage for Storyteller.
//!
//! [`ObjectAudioStore`] persists finished narrations through the
//! [`object_store`] crate. Production uses Google Cloud Storage; local runs use
//! a directory, and tests use an in-memory store.
//!
//! # Example
//!
//! ```
//! use storyteller_core::AudioEncoding;
//! use storyteller_interface::AudioStore;
//! use storyteller_storage::{ObjectAudioStore, story_object_name};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ObjectAudioStore::in_memory("storyteller-audio-bucket");
//! let name = story_object_name(AudioEncoding::Mp3);
//! let stored = store.put(&name, vec![0xFF, 0xFB], "audio/mpeg").await?;
//! assert!(stored.url.starts_with("https://storage.googleapis.com/storyteller-audio-bucket/story-"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod naming;
mod object;

pub use config::{StorageBackend, StorageConfig};
pub use naming::story_object_name;
pub use object::ObjectAudioStore;

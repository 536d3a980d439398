//! Error types for the Storyteller service.
//!
//! Every crate in the workspace reports failures through the types defined here.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! The task-level taxonomy is:
//! - [`GenerationError`]: outline or section generation failed (fatal to a task)
//! - [`GenerationErrorKind::Summary`]: rolling summary failed (recovered with a placeholder)
//! - [`SynthesisError`]: narration failed, including audio persistence (fatal to a task)
//! - [`DatabaseError`] with [`DatabaseErrorKind::NotFound`]: unknown task id
//! - [`ConfigError`]: missing credentials or configuration
//! - [`ServerError`]: the HTTP listener could not start or stopped unexpectedly
//!
//! # Examples
//!
//! ```
//! use storyteller_error::{StorytellerResult, SynthesisError, SynthesisErrorKind};
//!
//! fn narrate(text: &str) -> StorytellerResult<Vec<u8>> {
//!     if text.trim().is_empty() {
//!         Err(SynthesisError::new(SynthesisErrorKind::NoChunks))?
//!     }
//!     Ok(Vec::new())
//! }
//!
//! assert!(narrate("   ").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod database;
mod error;
mod generation;
mod server;
mod storage;
mod synthesis;

pub use config::ConfigError;
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{StorytellerError, StorytellerErrorKind, StorytellerResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use server::ServerError;
pub use storage::{StorageError, StorageErrorKind};
pub use synthesis::{SynthesisError, SynthesisErrorKind};

//! Trait definitions for the Storyteller service.
//!
//! Every external collaborator of the story pipeline sits behind one of these
//! traits so that the pipeline can run against real services or in-memory fakes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod repository;
mod traits;
mod types;

pub use repository::{TaskRepository, validate_transition};
pub use traits::{AudioStore, LongFormSynthesizer, SpeechSynthesizer, TextGenerator};
pub use types::StoredAudio;

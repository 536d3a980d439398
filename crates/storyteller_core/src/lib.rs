//! Core data types for the Storyteller service.
//!
//! This crate provides the task record, its status state machine, and the
//! request/response types exchanged with the text and speech collaborators.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod message;
mod output;
mod request;
mod role;
mod speech;
mod task;

pub use message::Message;
pub use output::Output;
pub use request::{GenerateRequest, GenerateResponse};
pub use role::Role;
pub use speech::{
    AudioEncoding, AudioSegment, LongFormRequest, OperationHandle, OperationState,
    SpeechRequest, Voice, VoiceInfo,
};
pub use task::{Outline, Task, TaskId, TaskStatus};

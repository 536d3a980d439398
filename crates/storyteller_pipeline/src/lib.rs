//! Story generation pipeline for Storyteller.
//!
//! A task moves through four phases, each backed by an injected collaborator:
//!
//! 1. [`OutlineGenerator`] asks the text model for an ordered list of beats.
//! 2. [`SectionWriter`] expands each beat into prose, carrying a rolling
//!    summary and the tail of the story so far.
//! 3. [`Narrator`] splits the story into sentence-aligned chunks, synthesizes
//!    them, and persists the joined audio.
//! 4. [`StoryPipeline`] drives the phases and records status transitions in
//!    the [`TaskRepository`](storyteller_interface::TaskRepository).
//!
//! [`TaskDispatcher`] runs pipelines in the background so the caller only
//! holds a task id. Progress is reported to a [`PipelineObserver`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod dispatcher;
mod events;
mod in_memory_repository;
mod metrics;
mod narration;
mod orchestrator;
mod outline;
mod prompts;
mod sections;

pub use config::{
    NarrationMode, PipelineConfig, PipelineConfigBuilder, SpeechConfig, SpeechConfigBuilder,
};
pub use dispatcher::TaskDispatcher;
pub use events::{PipelineEvent, PipelineObserver, RecordingObserver, RunContext, TracingObserver};
pub use in_memory_repository::InMemoryTaskRepository;
pub use metrics::PipelineMetrics;
pub use narration::{Narrator, chunk_text};
pub use orchestrator::StoryPipeline;
pub use outline::OutlineGenerator;
pub use prompts::{FIRST_SUMMARY, SUMMARY_FALLBACK};
pub use sections::{SectionWriter, StoryDraft};

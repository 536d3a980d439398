//! Storyteller - narrated sleep stories from a single prompt.
//!
//! A prompt goes in; a task id comes back immediately. In the background the
//! story is outlined, written section by section with a rolling summary,
//! narrated in sentence-aligned chunks, and stored as one MP3 whose public
//! URL is recorded on the task.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use storyteller::{Secrets, StorytellerConfig, build_state, serve};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StorytellerConfig::load()?;
//!     let secrets = Secrets::from_env();
//!     let state = build_state(&config, &secrets)?;
//!     serve(state, config.server()).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `observability` - OpenTelemetry span and metric export to stdout
//! - `api` - gate tests that call real Google APIs
//!
//! # Architecture
//!
//! - `storyteller_error` - Error types
//! - `storyteller_core` - Tasks, outlines, generation and speech requests
//! - `storyteller_interface` - Collaborator traits
//! - `storyteller_models` - Gemini and Cloud Text-to-Speech clients
//! - `storyteller_storage` - Audio object storage
//! - `storyteller_database` - SQLite task store
//! - `storyteller_pipeline` - Outline, sections, narration, orchestration
//! - `storyteller_server` - HTTP request surface
//!
//! This crate re-exports the commonly used items and adds configuration
//! loading, collaborator wiring, and logging setup.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod config;
mod observability;

pub use app::{build_pipeline, build_state, narrator, open_repository, speech_client};
pub use config::{DatabaseConfig, ENV_PREFIX, Secrets, StorytellerConfig};
pub use observability::{ObservabilityConfig, init_observability};

pub use storyteller_core::*;
pub use storyteller_error::*;
pub use storyteller_interface::*;

pub use storyteller_database::SqliteTaskRepository;
pub use storyteller_models::{GeminiClient, GeminiConfig, GoogleTtsClient, GoogleTtsConfig, TtsCredential};
pub use storyteller_pipeline::{
    InMemoryTaskRepository, NarrationMode, Narrator, PipelineConfig, PipelineEvent,
    PipelineObserver, SpeechConfig, StoryPipeline, TaskDispatcher, TracingObserver, chunk_text,
};
pub use storyteller_server::{AppState, ServerConfig, create_router, serve};
pub use storyteller_storage::{ObjectAudioStore, StorageBackend, StorageConfig};

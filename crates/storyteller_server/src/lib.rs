//! HTTP request surface for Storyteller.
//!
//! Two resources: `POST /stories` starts a story and answers immediately with
//! its task id; `GET /stories/{task_id}` reports progress and, once complete,
//! the story text and narration URL. `GET /health` is a liveness probe.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use storyteller_server::{AppState, ServerConfig, serve};
//! use storyteller_pipeline::TaskDispatcher;
//!
//! # async fn run(dispatcher: TaskDispatcher) -> storyteller_error::StorytellerResult<()> {
//! let config = ServerConfig::default();
//! let state = Arc::new(AppState::new(dispatcher, config.clone()));
//! serve(state, &config).await
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod dto;
mod error;
mod handlers;
mod routes;
mod server;
mod state;

pub use config::{ServerConfig, ServerConfigBuilder};
pub use dto::{CreateStoryRequest, CreateStoryResponse, StoryResponse};
pub use error::ApiError;
pub use routes::create_router;
pub use server::{serve, shutdown_signal};
pub use state::AppState;

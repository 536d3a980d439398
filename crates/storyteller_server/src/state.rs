//! Shared handler state.

use crate::ServerConfig;
use std::sync::Arc;
use storyteller_interface::TaskRepository;
use storyteller_pipeline::TaskDispatcher;

/// State shared by every request.
#[derive(Clone)]
pub struct AppState {
    /// Starts story runs in the background
    pub dispatcher: TaskDispatcher,
    /// Task store read by the polling endpoint
    pub repository: Arc<dyn TaskRepository>,
    /// Request limits
    pub config: ServerConfig,
}

impl AppState {
    /// Build state around a dispatcher, reading tasks from its pipeline's store.
    pub fn new(dispatcher: TaskDispatcher, config: ServerConfig) -> Self {
        let repository = dispatcher.pipeline().repository().clone();
        Self {
            dispatcher,
            repository,
            config,
        }
    }
}

//! Background execution of story runs.

use crate::StoryPipeline;
use std::sync::Arc;
use storyteller_core::Task;
use storyteller_error::StorytellerResult;
use tokio::sync::Semaphore;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, instrument, warn};

/// Starts pipeline runs without making the caller wait for them.
///
/// At most `max_concurrent` runs execute at once; the rest queue for a
/// permit. Runs cannot be cancelled once submitted.
#[derive(Clone)]
pub struct TaskDispatcher {
    pipeline: Arc<StoryPipeline>,
    tracker: TaskTracker,
    permits: Arc<Semaphore>,
}

impl TaskDispatcher {
    /// Create a dispatcher. A limit of zero is treated as one.
    pub fn new(pipeline: Arc<StoryPipeline>, max_concurrent: usize) -> Self {
        Self {
            pipeline,
            tracker: TaskTracker::new(),
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Create a `pending` task and start its run in the background.
    ///
    /// Returns as soon as the record exists.
    ///
    /// # Errors
    ///
    /// Returns an error only if the task record cannot be created.
    #[instrument(skip_all, fields(prompt_chars = prompt.len()))]
    pub async fn submit(&self, prompt: &str) -> StorytellerResult<Task> {
        let task = self.pipeline.repository().create(prompt).await?;
        info!(task_id = %task.id, "Task created");

        let pipeline = self.pipeline.clone();
        let permits = self.permits.clone();
        let task_id = task.id;
        let prompt = prompt.to_string();

        self.tracker.spawn(async move {
            let _permit = match permits.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    warn!(task_id = %task_id, "Dispatcher closed before the run started");
                    return;
                }
            };
            let status = pipeline.run(task_id, &prompt).await;
            debug!(task_id = %task_id, status = %status, "Run finished");
        });

        Ok(task)
    }

    /// Runs still in flight or waiting for a permit.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Close the tracker and wait for every submitted run to finish.
    pub async fn shutdown(&self) {
        self.tracker.close();
        info!(in_flight = self.tracker.len(), "Waiting for story runs to finish");
        self.tracker.wait().await;
    }

    /// Pipeline runs are dispatched to.
    pub fn pipeline(&self) -> &Arc<StoryPipeline> {
        &self.pipeline
    }
}

//! `run` command handler.

use std::sync::Arc;
use storyteller::{
    DatabaseError, DatabaseErrorKind, InMemoryTaskRepository, Secrets, StorytellerConfig,
    StorytellerResult, Task, TaskRepository, build_pipeline,
};
use tracing::info;

/// Write and narrate one story against an in-memory task store.
///
/// Returns the final task record whether the run completed or failed.
pub async fn run_story(
    config: StorytellerConfig,
    secrets: &Secrets,
    prompt: &str,
    beats: Option<usize>,
) -> StorytellerResult<Task> {
    let config = match beats {
        Some(beats) => {
            let pipeline = config.pipeline().clone().with_beat_count(beats);
            config.with_pipeline(pipeline)
        }
        None => config,
    };

    let repository: Arc<dyn TaskRepository> = Arc::new(InMemoryTaskRepository::new());
    let pipeline = build_pipeline(&config, secrets, repository.clone())?;

    let task = repository.create(prompt).await?;
    info!(task_id = %task.id, beats = *config.pipeline().beat_count(), "Running story");

    let status = pipeline.run(task.id, prompt).await;
    info!(task_id = %task.id, status = %status, "Story finished");

    repository
        .get(task.id)
        .await?
        .ok_or_else(|| DatabaseError::new(DatabaseErrorKind::NotFound(task.id.value())).into())
}

//! `status` command handler.

use storyteller::{
    DatabaseError, DatabaseErrorKind, StorytellerConfig, StorytellerResult, Task, TaskId,
    open_repository,
};

/// Read one task from the configured SQLite store.
pub async fn task_status(config: &StorytellerConfig, id: i64) -> StorytellerResult<Task> {
    let repository = open_repository(config)?;
    repository
        .get(TaskId::from(id))
        .await?
        .ok_or_else(|| DatabaseError::new(DatabaseErrorKind::NotFound(id)).into())
}

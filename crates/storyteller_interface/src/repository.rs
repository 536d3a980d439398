//! Task record store interface.

use async_trait::async_trait;
use storyteller_core::{Task, TaskId, TaskStatus};
use storyteller_error::{DatabaseError, DatabaseErrorKind, StorytellerResult};

/// Durable record store for story tasks.
///
/// Implementations must enforce the status state machine: a status moves
/// only forward and never leaves `complete` or `failed`.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Create a task in `pending` status with no text or audio.
    async fn create(&self, prompt: &str) -> StorytellerResult<Task>;

    /// Fetch a task, `None` when the id is unknown.
    async fn get(&self, id: TaskId) -> StorytellerResult<Option<Task>>;

    /// Move a task to `status`.
    ///
    /// # Errors
    ///
    /// `DatabaseErrorKind::NotFound` for an unknown id,
    /// `DatabaseErrorKind::InvalidTransition` for a backward or terminal move.
    async fn update_status(&self, id: TaskId, status: TaskStatus) -> StorytellerResult<Task>;

    /// Set story text, audio URL, and `complete` status in one atomic write.
    async fn complete(
        &self,
        id: TaskId,
        story_text: &str,
        audio_url: &str,
    ) -> StorytellerResult<Task>;
}

/// Check a status change against the state machine.
///
/// # Examples
///
/// ```
/// use storyteller_core::TaskStatus;
/// use storyteller_interface::validate_transition;
///
/// assert!(validate_transition(TaskStatus::Pending, TaskStatus::GeneratingStory).is_ok());
/// assert!(validate_transition(TaskStatus::Failed, TaskStatus::Pending).is_err());
/// ```
pub fn validate_transition(from: TaskStatus, to: TaskStatus) -> Result<(), DatabaseError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(DatabaseError::new(DatabaseErrorKind::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }))
    }
}

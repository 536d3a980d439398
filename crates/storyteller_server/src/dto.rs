//! Request and response bodies.

use serde::{Deserialize, Serialize};
use storyteller_core::{Task, TaskId, TaskStatus};

/// Body of `POST /stories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateStoryRequest {
    /// What the story should be about
    pub prompt: String,
}

/// Answer to `POST /stories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateStoryResponse {
    /// Id to poll
    pub task_id: TaskId,
    /// Always `pending` on creation
    pub status: TaskStatus,
}

impl From<&Task> for CreateStoryResponse {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.id,
            status: task.status,
        }
    }
}

/// Answer to `GET /stories/{task_id}`.
///
/// # Examples
///
/// ```
/// use storyteller_core::{TaskId, TaskStatus};
/// use storyteller_server::StoryResponse;
///
/// let body = StoryResponse {
///     task_id: TaskId::from(3),
///     status: TaskStatus::GeneratingAudio,
///     story_text: None,
///     audio_url: None,
/// };
/// assert_eq!(
///     serde_json::to_string(&body).unwrap(),
///     r#"{"task_id":3,"status":"generating_audio"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryResponse {
    /// Task id
    pub task_id: TaskId,
    /// Current status
    pub status: TaskStatus,
    /// Story text, present once complete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_text: Option<String>,
    /// Narration URL, present once complete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl From<Task> for StoryResponse {
    fn from(task: Task) -> Self {
        Self {
            task_id: task.id,
            status: task.status,
            story_text: task.story_text,
            audio_url: task.audio_url,
        }
    }
}

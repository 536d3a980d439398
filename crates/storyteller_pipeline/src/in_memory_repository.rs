//! In-memory implementation of `TaskRepository`.
//!
//! Useful for tests and for one-off local runs where nothing needs to
//! survive the process.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use storyteller_core::{Task, TaskId, TaskStatus};
use storyteller_error::{DatabaseError, DatabaseErrorKind, StorytellerResult};
use storyteller_interface::{TaskRepository, validate_transition};
use tokio::sync::RwLock;

/// In-memory task store.
///
/// Tasks live in a HashMap behind an RwLock; all data is lost when the last
/// clone is dropped.
///
/// # Example
/// ```
/// use storyteller_core::TaskStatus;
/// use storyteller_interface::TaskRepository;
/// use storyteller_pipeline::InMemoryTaskRepository;
///
/// # #[tokio::main]
/// # async fn main() -> storyteller_error::StorytellerResult<()> {
/// let repo = InMemoryTaskRepository::new();
/// let task = repo.create("a sleepy owl").await?;
/// assert_eq!(task.status, TaskStatus::Pending);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    /// Tasks keyed by ID
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
    /// Next ID to assign
    next_id: Arc<AtomicI64>,
}

impl InMemoryTaskRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Number of stored tasks.
    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    /// Check if the repository is empty.
    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(id: TaskId) -> DatabaseError {
    DatabaseError::new(DatabaseErrorKind::NotFound(id.value()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, prompt: &str) -> StorytellerResult<Task> {
        let id = TaskId::from(self.next_id.fetch_add(1, Ordering::SeqCst));
        let now = chrono::Utc::now();
        let task = Task {
            id,
            prompt: prompt.to_string(),
            status: TaskStatus::Pending,
            story_text: None,
            audio_url: None,
            created_at: now,
            updated_at: now,
        };

        self.tasks.write().await.insert(id, task.clone());
        Ok(task)
    }

    async fn get(&self, id: TaskId) -> StorytellerResult<Option<Task>> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn update_status(&self, id: TaskId, status: TaskStatus) -> StorytellerResult<Task> {
        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(&id).ok_or_else(|| not_found(id))?;
        validate_transition(task.status, status)?;

        task.status = status;
        task.updated_at = chrono::Utc::now();
        Ok(task.clone())
    }

    async fn complete(
        &self,
        id: TaskId,
        story_text: &str,
        audio_url: &str,
    ) -> StorytellerResult<Task> {
        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(&id).ok_or_else(|| not_found(id))?;
        validate_transition(task.status, TaskStatus::Complete)?;

        task.status = TaskStatus::Complete;
        task.story_text = Some(story_text.to_string());
        task.audio_url = Some(audio_url.to_string());
        task.updated_at = chrono::Utc::now();
        Ok(task.clone())
    }
}

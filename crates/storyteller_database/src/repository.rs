//! SQLite implementation of `TaskRepository`.

use crate::establish_connection;
use crate::models::{NewStoryRow, StoryRow};
use crate::schema::stories;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use storyteller_core::{Task, TaskId, TaskStatus};
use storyteller_error::{DatabaseError, DatabaseErrorKind, StorytellerResult};
use storyteller_interface::{TaskRepository, validate_transition};
use tokio::sync::Mutex;

/// SQLite task store using Diesel.
///
/// One connection is shared behind an async mutex, so writes from
/// concurrent tasks are serialized.
///
/// # Example
/// ```no_run
/// use storyteller_database::SqliteTaskRepository;
/// use storyteller_interface::TaskRepository;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let repo = SqliteTaskRepository::open("./storyteller.db")?;
///     let task = repo.create("A story about a friendly dragon who learns to bake").await?;
///     println!("created task {}", task.id);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct SqliteTaskRepository {
    conn: Arc<Mutex<SqliteConnection>>,
}

impl SqliteTaskRepository {
    /// Open (creating if needed) the database at `database_url` and run migrations.
    pub fn open(database_url: &str) -> StorytellerResult<Self> {
        let conn = establish_connection(database_url)?;
        Ok(Self::new(conn))
    }

    /// Wrap an already-migrated connection.
    pub fn new(conn: SqliteConnection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Most recent tasks, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn recent(&self, limit: i64) -> StorytellerResult<Vec<Task>> {
        let mut conn = self.conn.lock().await;
        let rows: Vec<StoryRow> = stories::table
            .order(stories::id.desc())
            .limit(limit)
            .select(StoryRow::as_select())
            .load(&mut *conn)
            .map_err(DatabaseError::from)?;
        let tasks = rows
            .into_iter()
            .map(Task::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }
}

fn load_row(conn: &mut SqliteConnection, id: TaskId) -> Result<StoryRow, DatabaseError> {
    stories::table
        .find(id.value())
        .select(StoryRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| DatabaseError::new(DatabaseErrorKind::NotFound(id.value())))
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    #[tracing::instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn create(&self, prompt: &str) -> StorytellerResult<Task> {
        let mut conn = self.conn.lock().await;
        let now = Utc::now().naive_utc();
        let new_row = NewStoryRow {
            prompt,
            status: TaskStatus::Pending.as_str(),
            created_at: now,
            updated_at: now,
        };

        let row: StoryRow = diesel::insert_into(stories::table)
            .values(&new_row)
            .returning(StoryRow::as_returning())
            .get_result(&mut *conn)
            .map_err(DatabaseError::from)?;

        tracing::debug!(task_id = row.id, "Created task");
        Ok(Task::try_from(row)?)
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: TaskId) -> StorytellerResult<Option<Task>> {
        let mut conn = self.conn.lock().await;
        let row: Option<StoryRow> = stories::table
            .find(id.value())
            .select(StoryRow::as_select())
            .first(&mut *conn)
            .optional()
            .map_err(DatabaseError::from)?;

        Ok(row.map(Task::try_from).transpose()?)
    }

    #[tracing::instrument(skip(self))]
    async fn update_status(&self, id: TaskId, status: TaskStatus) -> StorytellerResult<Task> {
        let mut conn = self.conn.lock().await;

        let row = conn.transaction::<StoryRow, DatabaseError, _>(|conn| {
            let current = load_row(conn, id)?.task_status()?;
            validate_transition(current, status)?;

            let row = diesel::update(stories::table.find(id.value()))
                .set((
                    stories::status.eq(status.as_str()),
                    stories::updated_at.eq(Utc::now().naive_utc()),
                ))
                .returning(StoryRow::as_returning())
                .get_result(conn)?;
            Ok(row)
        })?;

        tracing::debug!(status = %status, "Updated task status");
        Ok(Task::try_from(row)?)
    }

    #[tracing::instrument(skip(self, story_text), fields(text_len = story_text.len()))]
    async fn complete(
        &self,
        id: TaskId,
        story_text: &str,
        audio_url: &str,
    ) -> StorytellerResult<Task> {
        let mut conn = self.conn.lock().await;

        let row = conn.transaction::<StoryRow, DatabaseError, _>(|conn| {
            let current = load_row(conn, id)?.task_status()?;
            validate_transition(current, TaskStatus::Complete)?;

            let row = diesel::update(stories::table.find(id.value()))
                .set((
                    stories::status.eq(TaskStatus::Complete.as_str()),
                    stories::story_text.eq(Some(story_text)),
                    stories::audio_url.eq(Some(audio_url)),
                    stories::updated_at.eq(Utc::now().naive_utc()),
                ))
                .returning(StoryRow::as_returning())
                .get_result(conn)?;
            Ok(row)
        })?;

        tracing::info!("Task complete");
        Ok(Task::try_from(row)?)
    }
}

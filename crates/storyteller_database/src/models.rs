//! Row types for the `stories` table.

use crate::schema::stories;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use std::str::FromStr;
use storyteller_core::{Task, TaskId, TaskStatus};
use storyteller_error::{DatabaseError, DatabaseErrorKind};

/// A row of the `stories` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = stories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StoryRow {
    /// Task id
    pub id: i64,
    /// Original prompt
    pub prompt: String,
    /// Status string
    pub status: String,
    /// Final story text
    pub story_text: Option<String>,
    /// Public audio URL
    pub audio_url: Option<String>,
    /// Creation time (UTC)
    pub created_at: NaiveDateTime,
    /// Last update time (UTC)
    pub updated_at: NaiveDateTime,
}

/// Insertable row for a new task.
#[derive(Debug, Insertable)]
#[diesel(table_name = stories)]
pub struct NewStoryRow<'a> {
    /// Original prompt
    pub prompt: &'a str,
    /// Initial status
    pub status: &'a str,
    /// Creation time (UTC)
    pub created_at: NaiveDateTime,
    /// Last update time (UTC)
    pub updated_at: NaiveDateTime,
}

impl StoryRow {
    /// Decoded status column.
    pub fn task_status(&self) -> Result<TaskStatus, DatabaseError> {
        TaskStatus::from_str(&self.status).map_err(|_| {
            DatabaseError::new(DatabaseErrorKind::Corrupt(format!(
                "task {} has unknown status '{}'",
                self.id, self.status
            )))
        })
    }
}

impl TryFrom<StoryRow> for Task {
    type Error = DatabaseError;

    fn try_from(row: StoryRow) -> Result<Self, Self::Error> {
        let status = row.task_status()?;
        Ok(Task {
            id: TaskId::from(row.id),
            prompt: row.prompt,
            status,
            story_text: row.story_text,
            audio_url: row.audio_url,
            created_at: row.created_at.and_utc(),
            updated_at: row.updated_at.and_utc(),
        })
    }
}

//! Task records and the status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a story task, assigned by the task store at creation.
///
/// # Examples
///
/// ```
/// use storyteller_core::TaskId;
///
/// let id = TaskId::from(12);
/// assert_eq!(id.value(), 12);
/// assert_eq!(id.to_string(), "12");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Raw integer value.
    pub fn value(self) -> i64 {
        self.0
    }
}

/// Lifecycle status of a story task.
///
/// ```text
/// pending -> generating_story -> generating_audio -> complete
///    \______________\_________________\___________-> failed
/// ```
///
/// # Examples
///
/// ```
/// use storyteller_core::TaskStatus;
/// use std::str::FromStr;
///
/// assert_eq!(TaskStatus::GeneratingStory.as_str(), "generating_story");
/// assert_eq!(TaskStatus::from_str("complete").unwrap(), TaskStatus::Complete);
/// assert!(TaskStatus::Pending.can_transition_to(TaskStatus::GeneratingStory));
/// assert!(!TaskStatus::Complete.can_transition_to(TaskStatus::Failed));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskStatus {
    /// Created, not yet picked up
    Pending,
    /// Outline and sections are being written
    GeneratingStory,
    /// Story text is being narrated
    GeneratingAudio,
    /// Story text and audio URL are available
    Complete,
    /// The run failed; no further changes
    Failed,
}

impl TaskStatus {
    /// Wire and storage form of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::GeneratingStory => "generating_story",
            TaskStatus::GeneratingAudio => "generating_audio",
            TaskStatus::Complete => "complete",
            TaskStatus::Failed => "failed",
        }
    }

    /// Whether no further transitions are allowed.
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Complete | TaskStatus::Failed)
    }

    /// Whether moving from `self` to `next` follows the state machine.
    ///
    /// Progress moves one step at a time; `failed` is reachable from any
    /// non-terminal status.
    pub fn can_transition_to(self, next: TaskStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match (self, next) {
            (_, TaskStatus::Failed) => true,
            (TaskStatus::Pending, TaskStatus::GeneratingStory) => true,
            (TaskStatus::GeneratingStory, TaskStatus::GeneratingAudio) => true,
            (TaskStatus::GeneratingAudio, TaskStatus::Complete) => true,
            _ => false,
        }
    }
}

/// One story-generation request and its lifecycle state.
///
/// `story_text` and `audio_url` are written together when the task completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier
    pub id: TaskId,
    /// Listener's original request
    pub prompt: String,
    /// Current lifecycle status
    pub status: TaskStatus,
    /// Final story text, set at completion
    pub story_text: Option<String>,
    /// Public URL of the narration, set at completion
    pub audio_url: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Time of the last status change
    pub updated_at: DateTime<Utc>,
}

/// Ordered beat descriptions that drive section writing.
///
/// # Examples
///
/// ```
/// use storyteller_core::Outline;
///
/// let outline = Outline::from_beats(vec![
///     " The traveler reaches the lake. ".to_string(),
///     "   ".to_string(),
///     "Stars appear one by one.".to_string(),
/// ]);
///
/// assert_eq!(outline.len(), 2);
/// assert_eq!(outline.beats()[0], "The traveler reaches the lake.");
/// assert_eq!(outline.numbered(), "1. The traveler reaches the lake.\n2. Stars appear one by one.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Outline {
    beats: Vec<String>,
}

impl Outline {
    /// Build an outline, trimming each beat and discarding blank ones.
    pub fn from_beats(beats: impl IntoIterator<Item = String>) -> Self {
        Self {
            beats: beats
                .into_iter()
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty())
                .collect(),
        }
    }

    /// Beats in story order.
    pub fn beats(&self) -> &[String] {
        &self.beats
    }

    /// Number of beats.
    pub fn len(&self) -> usize {
        self.beats.len()
    }

    /// True when no beats remain.
    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }

    /// Beats rendered as a numbered list, one per line.
    pub fn numbered(&self) -> String {
        self.beats
            .iter()
            .enumerate()
            .map(|(i, beat)| format!("{}. {}", i + 1, beat))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

//! Pipeline progress events and their observers.

use crate::PipelineMetrics;
use std::sync::Mutex;
use storyteller_core::{TaskId, TaskStatus};
use tracing::{debug, error, info, warn};

/// Something that happened during a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// The task record moved to a new status
    StatusChanged {
        /// Task
        task_id: TaskId,
        /// New status
        status: TaskStatus,
    },
    /// The outline came back
    OutlineReady {
        /// Task
        task_id: TaskId,
        /// Usable beats
        beats: usize,
    },
    /// A rolling summary failed and the placeholder was used
    SummaryFallback {
        /// Task
        task_id: TaskId,
        /// Zero-based beat about to be written
        beat: usize,
        /// Underlying failure
        reason: String,
    },
    /// A section was appended to the story
    SectionWritten {
        /// Task
        task_id: TaskId,
        /// Zero-based beat
        beat: usize,
        /// Characters in the section
        chars: usize,
    },
    /// One narration chunk was synthesized
    ChunkSynthesized {
        /// Task
        task_id: TaskId,
        /// Zero-based chunk index
        index: usize,
        /// Total chunks
        total: usize,
        /// Encoded audio size
        bytes: usize,
    },
    /// The narration was persisted
    AudioStored {
        /// Task
        task_id: TaskId,
        /// Public URL
        url: String,
    },
    /// The task completed
    Completed {
        /// Task
        task_id: TaskId,
        /// Public URL of the narration
        url: String,
        /// Run duration in seconds
        elapsed_secs: f64,
    },
    /// The task failed
    Failed {
        /// Task
        task_id: TaskId,
        /// Rendered error
        reason: String,
        /// Run duration in seconds
        elapsed_secs: f64,
    },
}

impl PipelineEvent {
    /// Task the event belongs to.
    pub fn task_id(&self) -> TaskId {
        match self {
            PipelineEvent::StatusChanged { task_id, .. }
            | PipelineEvent::OutlineReady { task_id, .. }
            | PipelineEvent::SummaryFallback { task_id, .. }
            | PipelineEvent::SectionWritten { task_id, .. }
            | PipelineEvent::ChunkSynthesized { task_id, .. }
            | PipelineEvent::AudioStored { task_id, .. }
            | PipelineEvent::Completed { task_id, .. }
            | PipelineEvent::Failed { task_id, .. } => *task_id,
        }
    }
}

/// Receives pipeline events.
///
/// Observers run inline on the pipeline task and must not block.
pub trait PipelineObserver: Send + Sync {
    /// Handle one event.
    fn on_event(&self, event: &PipelineEvent);
}

/// Event sink bound to one task run.
#[derive(Clone, Copy)]
pub struct RunContext<'a> {
    task_id: TaskId,
    observer: &'a dyn PipelineObserver,
}

impl<'a> RunContext<'a> {
    /// Bind an observer to a task.
    pub fn new(task_id: TaskId, observer: &'a dyn PipelineObserver) -> Self {
        Self { task_id, observer }
    }

    /// Task being run.
    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Forward an event to the observer.
    pub fn emit(&self, event: PipelineEvent) {
        self.observer.on_event(&event);
    }
}

/// Logs events with `tracing` and counts them with OpenTelemetry.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_event(&self, event: &PipelineEvent) {
        let metrics = PipelineMetrics::get();
        match event {
            PipelineEvent::StatusChanged { task_id, status } => {
                info!(task_id = %task_id, status = %status, "Task status changed");
            }
            PipelineEvent::OutlineReady { task_id, beats } => {
                info!(task_id = %task_id, beats, "Outline ready");
            }
            PipelineEvent::SummaryFallback {
                task_id,
                beat,
                reason,
            } => {
                warn!(task_id = %task_id, beat, reason = %reason, "Rolling summary failed, using placeholder");
                metrics.record_summary_fallback();
            }
            PipelineEvent::SectionWritten {
                task_id,
                beat,
                chars,
            } => {
                debug!(task_id = %task_id, beat, chars, "Section written");
                metrics.record_section();
            }
            PipelineEvent::ChunkSynthesized {
                task_id,
                index,
                total,
                bytes,
            } => {
                debug!(task_id = %task_id, index, total, bytes, "Chunk synthesized");
                metrics.record_chunk(*bytes);
            }
            PipelineEvent::AudioStored { task_id, url } => {
                info!(task_id = %task_id, url = %url, "Narration stored");
            }
            PipelineEvent::Completed {
                task_id,
                url,
                elapsed_secs,
            } => {
                info!(task_id = %task_id, url = %url, elapsed_secs, "Story complete");
                metrics.record_finished("complete", *elapsed_secs);
            }
            PipelineEvent::Failed {
                task_id,
                reason,
                elapsed_secs,
            } => {
                error!(task_id = %task_id, reason = %reason, elapsed_secs, "Story failed");
                metrics.record_finished("failed", *elapsed_secs);
            }
        }
    }
}

/// Keeps every event in memory.
///
/// # Examples
///
/// ```
/// use storyteller_core::TaskId;
/// use storyteller_pipeline::{PipelineEvent, PipelineObserver, RecordingObserver};
///
/// let observer = RecordingObserver::new();
/// observer.on_event(&PipelineEvent::OutlineReady { task_id: TaskId::from(1), beats: 3 });
/// assert_eq!(observer.events().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<PipelineEvent>>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events in arrival order.
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Recorded events for one task.
    pub fn events_for(&self, task_id: TaskId) -> Vec<PipelineEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.task_id() == task_id)
            .collect()
    }

    /// Statuses recorded for one task, in order.
    pub fn statuses_for(&self, task_id: TaskId) -> Vec<TaskStatus> {
        self.events_for(task_id)
            .into_iter()
            .filter_map(|e| match e {
                PipelineEvent::StatusChanged { status, .. } => Some(status),
                _ => None,
            })
            .collect()
    }
}

impl PipelineObserver for RecordingObserver {
    fn on_event(&self, event: &PipelineEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}

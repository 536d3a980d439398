//! Metrics for pipeline runs.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::OnceLock;

static PIPELINE_METRICS: OnceLock<PipelineMetrics> = OnceLock::new();

/// Metrics for story pipeline runs.
#[derive(Clone)]
pub struct PipelineMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Finished runs, labeled by outcome
    pub tasks: Counter<u64>,
    /// Run duration in seconds
    pub task_duration: Histogram<f64>,
    /// Sections written
    pub sections: Counter<u64>,
    /// Rolling summaries replaced by the placeholder
    pub summary_fallbacks: Counter<u64>,
    /// Audio chunks synthesized
    pub chunks: Counter<u64>,
    /// Audio bytes synthesized
    pub audio_bytes: Counter<u64>,
}

impl PipelineMetrics {
    fn init() -> Self {
        let meter = global::meter("storyteller_pipeline");

        Self {
            _meter: meter.clone(),
            tasks: meter
                .u64_counter("pipeline.tasks")
                .with_description("Finished story tasks")
                .build(),
            task_duration: meter
                .f64_histogram("pipeline.task_duration")
                .with_unit("seconds")
                .with_description("Story task duration from start to terminal status")
                .build(),
            sections: meter
                .u64_counter("pipeline.sections")
                .with_description("Story sections written")
                .build(),
            summary_fallbacks: meter
                .u64_counter("pipeline.summary_fallbacks")
                .with_description("Rolling summaries replaced by the placeholder")
                .build(),
            chunks: meter
                .u64_counter("pipeline.chunks")
                .with_description("Narration chunks synthesized")
                .build(),
            audio_bytes: meter
                .u64_counter("pipeline.audio_bytes")
                .with_unit("bytes")
                .with_description("Narration audio synthesized")
                .build(),
        }
    }

    /// Get the global pipeline metrics instance.
    pub fn get() -> &'static Self {
        PIPELINE_METRICS.get_or_init(Self::init)
    }

    /// Record a run reaching a terminal status.
    pub fn record_finished(&self, outcome: &str, duration_secs: f64) {
        let labels = &[KeyValue::new("outcome", outcome.to_string())];
        self.tasks.add(1, labels);
        self.task_duration.record(duration_secs, labels);
    }

    /// Record a written section.
    pub fn record_section(&self) {
        self.sections.add(1, &[]);
    }

    /// Record a summary placeholder substitution.
    pub fn record_summary_fallback(&self) {
        self.summary_fallbacks.add(1, &[]);
    }

    /// Record a synthesized chunk.
    pub fn record_chunk(&self, bytes: usize) {
        self.chunks.add(1, &[]);
        self.audio_bytes.add(bytes as u64, &[]);
    }
}

//! Metrics for model API calls.
//!
//! OpenTelemetry instruments for text generation and speech synthesis,
//! labeled by provider and model or voice.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::OnceLock;

static LLM_METRICS: OnceLock<LlmMetrics> = OnceLock::new();
static SPEECH_METRICS: OnceLock<SpeechMetrics> = OnceLock::new();

/// Metrics for text generation calls.
#[derive(Clone)]
pub struct LlmMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Total generation requests
    pub requests: Counter<u64>,
    /// Failed generation requests
    pub errors: Counter<u64>,
    /// Generation call duration in seconds
    pub duration: Histogram<f64>,
    /// Total tokens used (prompt + completion)
    pub tokens_used: Counter<u64>,
}

impl LlmMetrics {
    fn init() -> Self {
        let meter = global::meter("storyteller_llm");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("llm.requests")
                .with_description("Total LLM API requests")
                .build(),
            errors: meter
                .u64_counter("llm.errors")
                .with_description("Failed LLM API requests")
                .build(),
            duration: meter
                .f64_histogram("llm.duration")
                .with_unit("seconds")
                .with_description("LLM API call duration")
                .build(),
            tokens_used: meter
                .u64_counter("llm.tokens")
                .with_description("Total tokens used (prompt + completion)")
                .build(),
        }
    }

    /// Get the global LLM metrics instance.
    pub fn get() -> &'static Self {
        LLM_METRICS.get_or_init(Self::init)
    }

    /// Record a successful request.
    pub fn record_request(&self, provider: &str, model: &str, duration_secs: f64) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
        ];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed request.
    pub fn record_error(&self, provider: &str, model: &str, error_type: &str) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("error_type", error_type.to_string()),
        ];
        self.errors.add(1, labels);
    }

    /// Record token usage reported by the provider.
    pub fn record_tokens(&self, model: &str, total_tokens: u64) {
        let labels = &[KeyValue::new("model", model.to_string())];
        self.tokens_used.add(total_tokens, labels);
    }
}

/// Metrics for speech synthesis calls.
#[derive(Clone)]
pub struct SpeechMetrics {
    _meter: Meter,
    /// Total synthesis requests
    pub requests: Counter<u64>,
    /// Failed synthesis requests
    pub errors: Counter<u64>,
    /// Synthesis call duration in seconds
    pub duration: Histogram<f64>,
    /// Characters submitted for synthesis
    pub characters: Counter<u64>,
}

impl SpeechMetrics {
    fn init() -> Self {
        let meter = global::meter("storyteller_tts");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("tts.requests")
                .with_description("Total text-to-speech requests")
                .build(),
            errors: meter
                .u64_counter("tts.errors")
                .with_description("Failed text-to-speech requests")
                .build(),
            duration: meter
                .f64_histogram("tts.duration")
                .with_unit("seconds")
                .with_description("Text-to-speech call duration")
                .build(),
            characters: meter
                .u64_counter("tts.characters")
                .with_description("Characters submitted for synthesis")
                .build(),
        }
    }

    /// Get the global speech metrics instance.
    pub fn get() -> &'static Self {
        SPEECH_METRICS.get_or_init(Self::init)
    }

    /// Record a successful synthesis.
    pub fn record_request(&self, voice: &str, characters: usize, duration_secs: f64) {
        let labels = &[KeyValue::new("voice", voice.to_string())];
        self.requests.add(1, labels);
        self.characters.add(characters as u64, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed synthesis.
    pub fn record_error(&self, voice: &str, error_type: &str) {
        let labels = &[
            KeyValue::new("voice", voice.to_string()),
            KeyValue::new("error_type", error_type.to_string()),
        ];
        self.errors.add(1, labels);
    }
}

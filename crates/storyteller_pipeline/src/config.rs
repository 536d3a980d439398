//! Pipeline and narration settings.

use serde::{Deserialize, Serialize};

/// Story-writing settings.
///
/// # Examples
///
/// ```
/// use storyteller_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::builder().beat_count(5usize).build().unwrap();
/// assert_eq!(*config.beat_count(), 5);
/// assert_eq!(*config.tail_window_chars(), 500);
/// assert_eq!(config.section_break(), "\n\n...\n\n");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct PipelineConfig {
    /// Number of beats requested from the outline model
    #[serde(default = "default_beat_count")]
    beat_count: usize,

    /// Characters of accumulated text shown to each section request
    #[serde(default = "default_tail_window_chars")]
    tail_window_chars: usize,

    /// Separator placed between sections
    #[serde(default = "default_section_break")]
    section_break: String,

    /// Sampling temperature for rolling summaries
    #[serde(default = "default_summary_temperature")]
    summary_temperature: f32,

    /// Output token ceiling for rolling summaries
    #[serde(default = "default_summary_max_tokens")]
    summary_max_tokens: u32,

    /// Sampling temperature for sections
    #[serde(default = "default_section_temperature")]
    section_temperature: f32,

    /// Output token ceiling for sections
    #[serde(default = "default_section_max_tokens")]
    section_max_tokens: u32,
}

fn default_beat_count() -> usize {
    15
}

fn default_tail_window_chars() -> usize {
    500
}

fn default_section_break() -> String {
    "\n\n...\n\n".to_string()
}

fn default_summary_temperature() -> f32 {
    0.5
}

fn default_summary_max_tokens() -> u32 {
    512
}

fn default_section_temperature() -> f32 {
    0.7
}

fn default_section_max_tokens() -> u32 {
    8192
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            beat_count: default_beat_count(),
            tail_window_chars: default_tail_window_chars(),
            section_break: default_section_break(),
            summary_temperature: default_summary_temperature(),
            summary_max_tokens: default_summary_max_tokens(),
            section_temperature: default_section_temperature(),
            section_max_tokens: default_section_max_tokens(),
        }
    }
}

impl PipelineConfig {
    /// Creates a new config builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Same settings with a different beat count.
    pub fn with_beat_count(mut self, beat_count: usize) -> Self {
        self.beat_count = beat_count;
        self
    }
}

/// How a finished story becomes audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrationMode {
    /// Synthesize sentence-aligned chunks and join the MP3 segments
    #[default]
    Chunked,
    /// Hand the whole text to a long-running synthesis operation
    LongForm,
}

/// Narration settings.
///
/// # Examples
///
/// ```
/// use storyteller_pipeline::{NarrationMode, SpeechConfig};
///
/// let config = SpeechConfig::default();
/// assert_eq!(*config.mode(), NarrationMode::Chunked);
/// assert_eq!(config.voice(), "en-US-Chirp3-HD-Achernar");
/// assert_eq!(*config.chunk_max_bytes(), 4500);
/// assert!(!config.randomize_voice());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct SpeechConfig {
    /// Chunked or long-form synthesis
    #[serde(default)]
    mode: NarrationMode,

    /// Voice used when randomization is off
    #[serde(default = "default_voice")]
    voice: String,

    /// Pool drawn from when randomization is on
    #[serde(default = "default_voices")]
    voices: Vec<String>,

    /// Pick a voice per task from `voices`
    #[serde(default)]
    randomize_voice: bool,

    /// Speaking rate, 1.0 is normal speed
    #[serde(default = "default_speaking_rate")]
    speaking_rate: f32,

    /// Pitch shift in semitones
    #[serde(default)]
    pitch: f32,

    /// Byte ceiling for one synthesis chunk
    #[serde(default = "default_chunk_max_bytes")]
    chunk_max_bytes: usize,

    /// Seconds between long-form operation polls
    #[serde(default = "default_poll_interval_secs")]
    poll_interval_secs: u64,

    /// Upper bound on a long-form operation
    #[serde(default = "default_long_form_timeout_secs")]
    long_form_timeout_secs: u64,
}

fn default_voice() -> String {
    "en-US-Chirp3-HD-Achernar".to_string()
}

fn default_voices() -> Vec<String> {
    [
        "en-US-Chirp3-HD-Achernar",
        "en-US-Chirp3-HD-Aoede",
        "en-US-Chirp3-HD-Charon",
        "en-US-Chirp3-HD-Kore",
        "en-US-Chirp3-HD-Leda",
        "en-US-Chirp3-HD-Orus",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_speaking_rate() -> f32 {
    0.85
}

fn default_chunk_max_bytes() -> usize {
    4500
}

fn default_poll_interval_secs() -> u64 {
    10
}

fn default_long_form_timeout_secs() -> u64 {
    600
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            mode: NarrationMode::default(),
            voice: default_voice(),
            voices: default_voices(),
            randomize_voice: false,
            speaking_rate: default_speaking_rate(),
            pitch: 0.0,
            chunk_max_bytes: default_chunk_max_bytes(),
            poll_interval_secs: default_poll_interval_secs(),
            long_form_timeout_secs: default_long_form_timeout_secs(),
        }
    }
}

impl SpeechConfig {
    /// Creates a new config builder.
    pub fn builder() -> SpeechConfigBuilder {
        SpeechConfigBuilder::default()
    }
}

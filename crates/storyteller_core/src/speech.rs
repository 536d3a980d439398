//! Speech synthesis types.

use serde::{Deserialize, Serialize};

/// A synthesis voice.
///
/// # Examples
///
/// ```
/// use storyteller_core::Voice;
///
/// let voice = Voice::new("en-US-Chirp3-HD-Achernar");
/// assert_eq!(voice.language_code, "en-US");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Voice {
    /// Provider voice name, e.g. `en-US-Chirp3-HD-Achernar`
    pub name: String,
    /// BCP-47 language code
    pub language_code: String,
}

impl Voice {
    /// Create a voice, deriving the language code from the name prefix.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let language_code = name
            .splitn(3, '-')
            .take(2)
            .collect::<Vec<_>>()
            .join("-");
        Self {
            name,
            language_code,
        }
    }
}

/// Audio container/encoding of synthesized speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    /// MPEG layer 3, concatenable frame by frame
    #[default]
    Mp3,
    /// 16-bit PCM in a WAV container
    Linear16,
}

impl AudioEncoding {
    /// MIME type of the encoded audio.
    pub fn mime_type(self) -> &'static str {
        match self {
            AudioEncoding::Mp3 => "audio/mpeg",
            AudioEncoding::Linear16 => "audio/wav",
        }
    }

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            AudioEncoding::Mp3 => "mp3",
            AudioEncoding::Linear16 => "wav",
        }
    }
}

/// One synthesis call.
///
/// # Examples
///
/// ```
/// use storyteller_core::{SpeechRequest, Voice};
///
/// let request = SpeechRequest::new("The lake is still.", Voice::new("en-US-Chirp3-HD-Achernar"))
///     .with_speaking_rate(0.8);
/// assert_eq!(request.speaking_rate, 0.8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct SpeechRequest {
    /// Text to narrate
    pub text: String,
    /// Voice to narrate with
    pub voice: Voice,
    /// Output encoding
    pub encoding: AudioEncoding,
    /// Speaking rate, 1.0 is normal
    pub speaking_rate: f32,
    /// Pitch in semitones
    pub pitch: f32,
}

impl SpeechRequest {
    /// Create a request with MP3 output at normal rate and pitch.
    pub fn new(text: impl Into<String>, voice: Voice) -> Self {
        Self {
            text: text.into(),
            voice,
            encoding: AudioEncoding::Mp3,
            speaking_rate: 1.0,
            pitch: 0.0,
        }
    }
}

/// Synthesized audio for one chunk, tagged with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSegment {
    /// Zero-based chunk index
    pub index: usize,
    /// Encoded audio bytes
    pub bytes: Vec<u8>,
}

/// Voice advertised by a speech provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceInfo {
    /// Voice name
    pub name: String,
    /// Supported language codes
    #[serde(default)]
    pub language_codes: Vec<String>,
    /// SSML gender label
    #[serde(default)]
    pub ssml_gender: Option<String>,
    /// Native sample rate
    #[serde(default)]
    pub natural_sample_rate_hertz: Option<u32>,
}

/// Long-running synthesis of a whole story straight into object storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongFormRequest {
    /// Full story text
    pub text: String,
    /// Voice to narrate with
    pub voice: Voice,
    /// Speaking rate, 1.0 is normal
    pub speaking_rate: f32,
    /// Destination URI, e.g. `gs://bucket/story-<uuid>.wav`
    pub output_uri: String,
}

/// Handle of a submitted long-running operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationHandle {
    /// Provider operation name, used for polling
    pub name: String,
}

/// Observed state of a long-running operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationState {
    /// Still running
    Running,
    /// Finished successfully
    Done,
    /// Finished with an error
    Failed(String),
}

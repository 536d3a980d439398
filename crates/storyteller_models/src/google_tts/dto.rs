//! Cloud Text-to-Speech wire types.

use serde::{Deserialize, Serialize};
use storyteller_core::{AudioEncoding, VoiceInfo};

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SynthesisInput {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VoiceSelectionParams {
    pub language_code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AudioConfig {
    pub audio_encoding: AudioEncoding,
    pub speaking_rate: f32,
    pub pitch: f32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SynthesizeSpeechRequest {
    pub input: SynthesisInput,
    pub voice: VoiceSelectionParams,
    pub audio_config: AudioConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SynthesizeSpeechResponse {
    #[serde(default)]
    pub audio_content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ListVoicesResponse {
    #[serde(default)]
    pub voices: Vec<VoiceInfo>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SynthesizeLongAudioRequest {
    pub parent: String,
    pub input: SynthesisInput,
    pub audio_config: AudioConfig,
    pub output_gcs_uri: String,
    pub voice: VoiceSelectionParams,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub error: Option<OperationError>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OperationError {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

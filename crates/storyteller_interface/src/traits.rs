//! Trait definitions for text, speech, and storage collaborators.

use crate::StoredAudio;
use async_trait::async_trait;
use storyteller_core::{
    GenerateRequest, GenerateResponse, LongFormRequest, OperationHandle, OperationState,
    SpeechRequest, VoiceInfo,
};
use storyteller_error::StorytellerResult;

/// Text-completion backend used for outlines, summaries, and sections.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate model output for a request.
    ///
    /// When the request carries a response schema the response must hold
    /// an `Output::Json` value.
    async fn generate(&self, req: &GenerateRequest) -> StorytellerResult<GenerateResponse>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gemini-2.5-pro").
    fn model_name(&self) -> &str;
}

/// Text-to-speech backend for chunk-by-chunk narration.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize one chunk of text into encoded audio bytes.
    async fn synthesize(&self, req: &SpeechRequest) -> StorytellerResult<Vec<u8>>;

    /// Voices available for a language, or all voices when `None`.
    async fn list_voices(&self, _language_code: Option<&str>) -> StorytellerResult<Vec<VoiceInfo>> {
        Ok(Vec::new())
    }

    /// Provider name (e.g., "google-tts").
    fn provider_name(&self) -> &'static str;

    /// Hard ceiling on the UTF-8 size of one request's text.
    fn max_input_bytes(&self) -> usize {
        5000
    }
}

/// Text-to-speech backend that narrates a whole story as a long-running
/// operation writing straight to object storage.
#[async_trait]
pub trait LongFormSynthesizer: Send + Sync {
    /// Submit the operation.
    async fn start(&self, req: &LongFormRequest) -> StorytellerResult<OperationHandle>;

    /// Check the operation's state once.
    async fn poll(&self, operation: &OperationHandle) -> StorytellerResult<OperationState>;
}

/// Object storage hosting finished narrations.
#[async_trait]
pub trait AudioStore: Send + Sync {
    /// Persist audio under `name` and return where listeners can fetch it.
    async fn put(
        &self,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> StorytellerResult<StoredAudio>;

    /// Public URL for an object name.
    fn public_url(&self, name: &str) -> String;

    /// Provider-native URI for an object name (e.g. `gs://bucket/name`),
    /// used as a long-form synthesis destination.
    fn location_uri(&self, name: &str) -> String;
}

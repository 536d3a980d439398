//! Cloud Text-to-Speech REST client.

use super::dto::{
    AudioConfig, ListVoicesResponse, Operation, SynthesisInput, SynthesizeLongAudioRequest,
    SynthesizeSpeechRequest, SynthesizeSpeechResponse, VoiceSelectionParams,
};
use crate::{GoogleTtsConfig, SpeechMetrics, TtsCredential};
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, RequestBuilder, Response};
use std::time::{Duration, Instant};
use storyteller_core::{
    AudioEncoding, LongFormRequest, OperationHandle, OperationState, SpeechRequest, Voice,
    VoiceInfo,
};
use storyteller_error::{
    ConfigError, StorytellerError, StorytellerResult, SynthesisError, SynthesisErrorKind,
};
use storyteller_interface::{LongFormSynthesizer, SpeechSynthesizer};
use tracing::{debug, instrument};

/// Request size ceiling enforced by `text:synthesize`.
const MAX_INPUT_BYTES: usize = 5000;

/// REST client for Google Cloud Text-to-Speech.
#[derive(Debug, Clone)]
pub struct GoogleTtsClient {
    client: Client,
    config: GoogleTtsConfig,
    credential: TtsCredential,
}

impl GoogleTtsClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the credential is blank or the HTTP
    /// client cannot be built.
    #[instrument(skip_all, fields(base_url = %config.base_url()))]
    pub fn new(config: GoogleTtsConfig, credential: TtsCredential) -> StorytellerResult<Self> {
        if credential.is_empty() {
            return Err(ConfigError::new(
                "Text-to-speech credential is empty; set GOOGLE_TTS_API_KEY or GOOGLE_ACCESS_TOKEN",
            )
            .into());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(*config.timeout_secs()))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;

        debug!("Created Text-to-Speech client");
        Ok(Self {
            client,
            config,
            credential,
        })
    }

    /// Client configuration.
    pub fn config(&self) -> &GoogleTtsConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url().trim_end_matches('/'), path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.credential {
            TtsCredential::ApiKey(key) => builder.header("x-goog-api-key", key),
            TtsCredential::AccessToken(token) => builder.bearer_auth(token),
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, SynthesisError> {
        let response = self.authorize(builder).send().await.map_err(|e| {
            tracing::error!("Request failed: {}", e);
            SynthesisError::new(SynthesisErrorKind::Request(e.to_string()))
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), "Text-to-Speech returned error");
            return Err(SynthesisError::new(SynthesisErrorKind::HttpStatus {
                status_code: status.as_u16(),
                message,
            }));
        }
        Ok(response)
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: Response,
    ) -> Result<T, SynthesisError> {
        response.json().await.map_err(|e| {
            tracing::error!("Failed to parse response: {}", e);
            SynthesisError::new(SynthesisErrorKind::Decode(format!(
                "Failed to parse response: {}",
                e
            )))
        })
    }

    fn voice_params(voice: &Voice) -> VoiceSelectionParams {
        VoiceSelectionParams {
            language_code: voice.language_code.clone(),
            name: voice.name.clone(),
        }
    }

    async fn synthesize_once(&self, req: &SpeechRequest) -> Result<Vec<u8>, SynthesisError> {
        let body = SynthesizeSpeechRequest {
            input: SynthesisInput {
                text: req.text.clone(),
            },
            voice: Self::voice_params(&req.voice),
            audio_config: AudioConfig {
                audio_encoding: req.encoding,
                speaking_rate: req.speaking_rate,
                pitch: req.pitch,
            },
        };

        let response = self
            .send(self.client.post(self.url("text:synthesize")).json(&body))
            .await?;
        let payload: SynthesizeSpeechResponse = Self::decode(response).await?;

        let encoded = payload
            .audio_content
            .filter(|c| !c.is_empty())
            .ok_or_else(|| SynthesisError::new(SynthesisErrorKind::MissingAudio))?;

        STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| SynthesisError::new(SynthesisErrorKind::Decode(e.to_string())))
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTtsClient {
    #[instrument(skip(self, req), fields(voice = %req.voice.name, text_len = req.text.len()))]
    async fn synthesize(&self, req: &SpeechRequest) -> StorytellerResult<Vec<u8>> {
        let metrics = SpeechMetrics::get();
        let start = Instant::now();

        match self.synthesize_once(req).await {
            Ok(audio) => {
                metrics.record_request(
                    &req.voice.name,
                    req.text.chars().count(),
                    start.elapsed().as_secs_f64(),
                );
                debug!(bytes = audio.len(), "Synthesized chunk");
                Ok(audio)
            }
            Err(e) => {
                metrics.record_error(&req.voice.name, "synthesize");
                Err(StorytellerError::from(e))
            }
        }
    }

    #[instrument(skip(self))]
    async fn list_voices(&self, language_code: Option<&str>) -> StorytellerResult<Vec<VoiceInfo>> {
        let mut builder = self.client.get(self.url("voices"));
        if let Some(code) = language_code {
            builder = builder.query(&[("languageCode", code)]);
        }
        let response = self.send(builder).await?;
        let payload: ListVoicesResponse = Self::decode(response).await?;
        debug!(count = payload.voices.len(), "Listed voices");
        Ok(payload.voices)
    }

    fn provider_name(&self) -> &'static str {
        "google-tts"
    }

    fn max_input_bytes(&self) -> usize {
        MAX_INPUT_BYTES
    }
}

#[async_trait]
impl LongFormSynthesizer for GoogleTtsClient {
    #[instrument(skip(self, req), fields(voice = %req.voice.name, output = %req.output_uri))]
    async fn start(&self, req: &LongFormRequest) -> StorytellerResult<OperationHandle> {
        let project = self
            .config
            .project_id()
            .as_deref()
            .ok_or_else(|| SynthesisError::new(SynthesisErrorKind::LongFormUnavailable))?;
        let parent = format!("projects/{}/locations/{}", project, self.config.location());

        let body = SynthesizeLongAudioRequest {
            parent: parent.clone(),
            input: SynthesisInput {
                text: req.text.clone(),
            },
            audio_config: AudioConfig {
                audio_encoding: AudioEncoding::Linear16,
                speaking_rate: req.speaking_rate,
                pitch: 0.0,
            },
            output_gcs_uri: req.output_uri.clone(),
            voice: Self::voice_params(&req.voice),
        };

        let url = self.url(&format!("{}:synthesizeLongAudio", parent));
        let response = self.send(self.client.post(url).json(&body)).await?;
        let operation: Operation = Self::decode(response).await?;

        tracing::info!(operation = %operation.name, "Submitted long audio synthesis");
        Ok(OperationHandle {
            name: operation.name,
        })
    }

    #[instrument(skip(self), fields(operation = %operation.name))]
    async fn poll(&self, operation: &OperationHandle) -> StorytellerResult<OperationState> {
        let response = self
            .send(self.client.get(self.url(&operation.name)))
            .await?;
        let operation: Operation = Self::decode(response).await?;

        let state = match (operation.done, operation.error) {
            (_, Some(error)) => {
                OperationState::Failed(format!("code {}: {}", error.code, error.message))
            }
            (true, None) => OperationState::Done,
            (false, None) => OperationState::Running,
        };
        debug!(state = ?state, "Polled long audio operation");
        Ok(state)
    }
}

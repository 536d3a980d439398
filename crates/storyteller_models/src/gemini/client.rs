//! Gemini `generateContent` client.

use super::dto::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};
use crate::{GeminiConfig, LlmMetrics};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use storyteller_core::{GenerateRequest, GenerateResponse, Output, Role};
use storyteller_error::{
    ConfigError, GenerationError, GenerationErrorKind, StorytellerError, StorytellerResult,
};
use storyteller_interface::TextGenerator;
use tracing::{debug, instrument};

const PROVIDER: &str = "gemini";

/// REST client for Gemini text generation.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
    api_key: String,
}

impl GeminiClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the API key is empty or the HTTP
    /// client cannot be built.
    #[instrument(skip_all, fields(model = %config.model()))]
    pub fn new(config: GeminiConfig, api_key: impl Into<String>) -> StorytellerResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::new("Gemini API key is empty; set GEMINI_API_KEY").into());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(*config.timeout_secs()))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;

        debug!("Created Gemini client");
        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Client configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn build_body(req: &GenerateRequest) -> GenerateContentRequest {
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();

        for message in &req.messages {
            let part = Part {
                text: message.text.clone(),
            };
            match message.role {
                Role::System => system_parts.push(part),
                Role::User => contents.push(Content {
                    role: Some("user".to_string()),
                    parts: vec![part],
                }),
                Role::Assistant => contents.push(Content {
                    role: Some("model".to_string()),
                    parts: vec![part],
                }),
            }
        }

        let system_instruction = if system_parts.is_empty() {
            None
        } else {
            Some(Content {
                role: None,
                parts: system_parts,
            })
        };

        let generation_config = GenerationConfig {
            temperature: req.temperature,
            max_output_tokens: req.max_tokens,
            response_mime_type: req
                .response_schema
                .as_ref()
                .map(|_| "application/json".to_string()),
            response_schema: req.response_schema.clone(),
        };

        GenerateContentRequest {
            contents,
            system_instruction,
            generation_config,
        }
    }

    async fn call(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenerationError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url().trim_end_matches('/'),
            model
        );
        debug!(url = %url, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Request failed: {}", e);
                GenerationError::new(GenerationErrorKind::Request(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), "Gemini returned error");
            return Err(GenerationError::new(GenerationErrorKind::HttpStatus {
                status_code: status.as_u16(),
                message,
            }));
        }

        response.json().await.map_err(|e| {
            tracing::error!("Failed to parse response: {}", e);
            GenerationError::new(GenerationErrorKind::MalformedPayload(format!(
                "Failed to parse response: {}",
                e
            )))
        })
    }

    fn into_response(
        req: &GenerateRequest,
        response: GenerateContentResponse,
    ) -> Result<GenerateResponse, GenerationError> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::NoCandidates))?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            debug!(finish_reason = ?candidate.finish_reason, "Candidate carried no text");
            return Err(GenerationError::new(GenerationErrorKind::EmptyOutput));
        }

        let output = if req.response_schema.is_some() {
            let value = serde_json::from_str(&text).map_err(|e| {
                GenerationError::new(GenerationErrorKind::MalformedPayload(format!(
                    "Structured output is not valid JSON: {}",
                    e
                )))
            })?;
            Output::Json(value)
        } else {
            Output::Text(text)
        };

        Ok(GenerateResponse {
            outputs: vec![output],
        })
    }
}

fn error_type(err: &GenerationError) -> &'static str {
    match &err.kind {
        GenerationErrorKind::Request(_) => "network",
        GenerationErrorKind::HttpStatus { status_code, .. } => match *status_code {
            429 => "rate_limit",
            401 | 403 => "auth",
            400..=499 => "invalid_request",
            _ => "server",
        },
        GenerationErrorKind::NoCandidates | GenerationErrorKind::EmptyOutput => "empty",
        GenerationErrorKind::MalformedPayload(_) => "malformed",
        _ => "unknown",
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(
        skip(self, req),
        fields(
            model = req.model.as_deref().unwrap_or(self.config.model().as_str()),
            structured = req.response_schema.is_some(),
            max_tokens = ?req.max_tokens,
        )
    )]
    async fn generate(&self, req: &GenerateRequest) -> StorytellerResult<GenerateResponse> {
        let model = req
            .model
            .clone()
            .unwrap_or_else(|| self.config.model().clone());
        let body = Self::build_body(req);
        let metrics = LlmMetrics::get();
        let start = Instant::now();

        let result = match self.call(&model, &body).await {
            Ok(response) => {
                if let Some(total) = response
                    .usage_metadata
                    .as_ref()
                    .and_then(|u| u.total_token_count)
                {
                    metrics.record_tokens(&model, total);
                }
                Self::into_response(req, response)
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(response) => {
                metrics.record_request(PROVIDER, &model, start.elapsed().as_secs_f64());
                Ok(response)
            }
            Err(e) => {
                metrics.record_error(PROVIDER, &model, error_type(&e));
                Err(StorytellerError::from(e))
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn model_name(&self) -> &str {
        self.config.model()
    }
}

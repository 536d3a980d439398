//! Request and response types for text generation.

use crate::{Message, Output};
use serde::{Deserialize, Serialize};

/// Generic generation request.
///
/// When `response_schema` is set, the provider is asked for JSON matching the
/// schema and the response carries [`Output::Json`].
///
/// # Examples
///
/// ```
/// use storyteller_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest {
///     messages: vec![Message::user("Summarize the story so far.")],
///     max_tokens: Some(512),
///     temperature: Some(0.5),
///     ..Default::default()
/// };
///
/// assert_eq!(request.messages.len(), 1);
/// assert!(request.response_schema.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 2.0)
    pub temperature: Option<f32>,
    /// Model identifier override
    pub model: Option<String>,
    /// JSON schema the response must follow
    pub response_schema: Option<serde_json::Value>,
}

impl GenerateRequest {
    /// Text of every message, in order, joined by blank lines.
    pub fn prompt_text(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use storyteller_core::{GenerateResponse, Output};
/// use serde_json::json;
///
/// let response = GenerateResponse {
///     outputs: vec![Output::Json(json!({"section": "The lake is still."}))],
/// };
///
/// assert_eq!(response.json().unwrap()["section"], "The lake is still.");
/// assert!(response.text().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated outputs from the model
    pub outputs: Vec<Output>,
}

impl GenerateResponse {
    /// Concatenated text outputs, if any.
    pub fn text(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .outputs
            .iter()
            .filter_map(|o| match o {
                Output::Text(t) => Some(t.as_str()),
                Output::Json(_) => None,
            })
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.concat())
        }
    }

    /// First structured output, if any.
    pub fn json(&self) -> Option<&serde_json::Value> {
        self.outputs.iter().find_map(|o| match o {
            Output::Json(v) => Some(v),
            Output::Text(_) => None,
        })
    }
}

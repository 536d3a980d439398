//! Output types from text model responses.

use serde::{Deserialize, Serialize};

/// Supported output types from a text model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),

    /// Structured JSON output, produced when the request carried a response schema.
    Json(serde_json::Value),
}

//! Outline generation.

use crate::prompts::{SYSTEM_INSTRUCTION, outline_prompt, outline_schema};
use serde_json::Value;
use std::sync::Arc;
use storyteller_core::{GenerateRequest, GenerateResponse, Message, Outline};
use storyteller_error::{GenerationError, GenerationErrorKind, StorytellerResult};
use storyteller_interface::TextGenerator;
use tracing::{debug, instrument};

/// Turns a listener's request into an ordered list of story beats.
#[derive(Clone)]
pub struct OutlineGenerator {
    generator: Arc<dyn TextGenerator>,
    beat_count: usize,
}

impl OutlineGenerator {
    /// Create a generator asking for `beat_count` beats.
    pub fn new(generator: Arc<dyn TextGenerator>, beat_count: usize) -> Self {
        Self {
            generator,
            beat_count,
        }
    }

    /// Ask the model for an outline.
    ///
    /// The model may return fewer or more beats than requested; blank beats
    /// are discarded.
    ///
    /// # Errors
    ///
    /// Returns a generation error if the call fails, the payload does not
    /// decode to `{"outline": [string, ...]}`, or no beats remain.
    #[instrument(skip(self, prompt), fields(beats = self.beat_count, model = self.generator.model_name()))]
    pub async fn generate(&self, prompt: &str) -> StorytellerResult<Outline> {
        let request = GenerateRequest {
            messages: vec![
                Message::system(SYSTEM_INSTRUCTION),
                Message::user(outline_prompt(prompt, self.beat_count)),
            ],
            response_schema: Some(outline_schema()),
            ..Default::default()
        };

        let response = self.generator.generate(&request).await?;
        let payload = structured_payload(&response)?;
        let outline = parse_outline(&payload)?;

        debug!(received = outline.len(), "Outline decoded");
        Ok(outline)
    }
}

fn parse_outline(payload: &Value) -> Result<Outline, GenerationError> {
    let items = payload
        .get("outline")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::MalformedPayload(
                "expected an \"outline\" array".to_string(),
            ))
        })?;

    let beats = items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                GenerationError::new(GenerationErrorKind::MalformedPayload(format!(
                    "outline beat is not a string: {}",
                    item
                )))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let outline = Outline::from_beats(beats);
    if outline.is_empty() {
        return Err(GenerationError::new(GenerationErrorKind::EmptyOutline));
    }
    Ok(outline)
}

/// JSON payload of a structured response.
///
/// Backends that return the structured payload as text are decoded here.
pub(crate) fn structured_payload(response: &GenerateResponse) -> Result<Value, GenerationError> {
    if let Some(value) = response.json() {
        return Ok(value.clone());
    }
    let text = response
        .text()
        .ok_or_else(|| GenerationError::new(GenerationErrorKind::EmptyOutput))?;
    serde_json::from_str(&text).map_err(|e| {
        GenerationError::new(GenerationErrorKind::MalformedPayload(format!(
            "Structured output is not valid JSON: {}",
            e
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_outline_drops_blank_beats() {
        let outline = parse_outline(&json!({"outline": ["  Walk to the shore ", "", "Watch the tide"]})).unwrap();
        assert_eq!(outline.beats(), ["Walk to the shore", "Watch the tide"]);
    }

    #[test]
    fn test_parse_outline_rejects_missing_array() {
        let err = parse_outline(&json!({"beats": ["one"]})).unwrap_err();
        assert!(matches!(err.kind, GenerationErrorKind::MalformedPayload(_)));
    }

    #[test]
    fn test_parse_outline_rejects_all_blank() {
        let err = parse_outline(&json!({"outline": [" ", ""]})).unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::EmptyOutline);
    }
}

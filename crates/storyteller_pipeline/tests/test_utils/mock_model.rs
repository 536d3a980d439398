//! Scripted text model.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Mutex;
use storyteller_core::{GenerateRequest, GenerateResponse, Output};
use storyteller_error::{GenerationError, GenerationErrorKind, StorytellerResult};
use storyteller_interface::TextGenerator;

/// Which prompt a request belongs to, judged by its response schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Outline,
    Section,
    Summary,
}

pub fn request_kind(req: &GenerateRequest) -> RequestKind {
    let properties = req
        .response_schema
        .as_ref()
        .and_then(|schema| schema.get("properties"))
        .and_then(Value::as_object);
    match properties {
        Some(p) if p.contains_key("outline") => RequestKind::Outline,
        Some(p) if p.contains_key("section") => RequestKind::Section,
        _ => RequestKind::Summary,
    }
}

fn unavailable() -> GenerationError {
    GenerationError::new(GenerationErrorKind::HttpStatus {
        status_code: 503,
        message: "model overloaded".to_string(),
    })
}

/// Text model answering outline, section, and summary requests.
///
/// Sections read `Beat N drifts by. The air is warm and still.`; summaries
/// read `Summary after N sections.`
pub struct MockStoryModel {
    outline: Option<Value>,
    fail_section: Option<usize>,
    empty_section: Option<usize>,
    fail_summaries: bool,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl MockStoryModel {
    /// Model whose outline holds `beats`.
    pub fn with_beats(beats: &[&str]) -> Self {
        Self::with_outline_payload(json!({ "outline": beats }))
    }

    /// Model returning an arbitrary outline payload.
    pub fn with_outline_payload(payload: Value) -> Self {
        Self {
            outline: Some(payload),
            fail_section: None,
            empty_section: None,
            fail_summaries: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Model whose outline request errors.
    pub fn failing_outline() -> Self {
        Self {
            outline: None,
            ..Self::with_beats(&[])
        }
    }

    /// Fail the section request for beat `index`.
    pub fn failing_section(mut self, index: usize) -> Self {
        self.fail_section = Some(index);
        self
    }

    /// Return a blank section for beat `index`.
    pub fn empty_section(mut self, index: usize) -> Self {
        self.empty_section = Some(index);
        self
    }

    /// Fail every summary request.
    pub fn failing_summaries(mut self) -> Self {
        self.fail_summaries = true;
        self
    }

    /// Requests seen so far.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests of one kind, in order.
    pub fn requests_of(&self, kind: RequestKind) -> Vec<GenerateRequest> {
        self.requests()
            .into_iter()
            .filter(|r| request_kind(r) == kind)
            .collect()
    }

    /// Text that section `n` (zero-based) is given.
    pub fn section_text(n: usize) -> String {
        format!("Beat {} drifts by. The air is warm and still.", n + 1)
    }
}

#[async_trait]
impl TextGenerator for MockStoryModel {
    async fn generate(&self, req: &GenerateRequest) -> StorytellerResult<GenerateResponse> {
        let kind = request_kind(req);
        let seen = {
            let mut requests = self.requests.lock().unwrap();
            let seen = requests.iter().filter(|r| request_kind(r) == kind).count();
            requests.push(req.clone());
            seen
        };

        let output = match kind {
            RequestKind::Outline => match &self.outline {
                Some(payload) => Output::Json(payload.clone()),
                None => return Err(unavailable().into()),
            },
            RequestKind::Section => {
                if self.fail_section == Some(seen) {
                    return Err(unavailable().into());
                }
                let text = if self.empty_section == Some(seen) {
                    "   ".to_string()
                } else {
                    Self::section_text(seen)
                };
                Output::Json(json!({ "section": text }))
            }
            RequestKind::Summary => {
                if self.fail_summaries {
                    return Err(unavailable().into());
                }
                Output::Text(format!("Summary after {} sections.", seen + 1))
            }
        };

        Ok(GenerateResponse {
            outputs: vec![output],
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-story-model"
    }
}

//! Section-by-section story writing with a rolling summary.

use crate::outline::structured_payload;
use crate::prompts::{
    FIRST_SUMMARY, SUMMARY_FALLBACK, SYSTEM_INSTRUCTION, SectionContext, section_prompt,
    section_schema, summary_prompt,
};
use crate::{PipelineConfig, PipelineEvent, RunContext};
use serde_json::Value;
use std::sync::Arc;
use storyteller_core::{GenerateRequest, Message, Outline};
use storyteller_error::{GenerationError, GenerationErrorKind, StorytellerResult};
use storyteller_interface::TextGenerator;
use tracing::{debug, instrument, warn};

/// A fully written story before narration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryDraft {
    /// Outline the story was written from
    pub outline: Outline,
    /// Sections in beat order, trimmed
    pub sections: Vec<String>,
    /// Sections joined with the section break
    pub text: String,
}

/// Expands outline beats into prose.
///
/// Each section request sees the original request, the whole outline, a
/// summary of everything written so far, and the last few hundred
/// characters verbatim so the prose flows across section boundaries.
#[derive(Clone)]
pub struct SectionWriter {
    generator: Arc<dyn TextGenerator>,
    config: PipelineConfig,
}

impl SectionWriter {
    /// Create a writer.
    pub fn new(generator: Arc<dyn TextGenerator>, config: PipelineConfig) -> Self {
        Self { generator, config }
    }

    /// Write one section per beat, in order.
    ///
    /// A failed rolling summary is replaced with a placeholder and reported
    /// as [`PipelineEvent::SummaryFallback`]; it never fails the story.
    ///
    /// # Errors
    ///
    /// Returns a generation error naming the beat when a section request
    /// fails or yields no text.
    #[instrument(skip_all, fields(task_id = %ctx.task_id(), beats = outline.len()))]
    pub async fn write(
        &self,
        prompt: &str,
        outline: &Outline,
        ctx: &RunContext<'_>,
    ) -> StorytellerResult<StoryDraft> {
        let mut sections: Vec<String> = Vec::with_capacity(outline.len());
        let mut text = String::new();

        for (index, beat) in outline.beats().iter().enumerate() {
            let summary = if text.is_empty() {
                FIRST_SUMMARY.to_string()
            } else {
                match self.summarize(&text).await {
                    Ok(summary) => summary,
                    Err(e) => {
                        warn!(beat = index, error = %e, "Rolling summary unavailable");
                        ctx.emit(PipelineEvent::SummaryFallback {
                            task_id: ctx.task_id(),
                            beat: index,
                            reason: e.to_string(),
                        });
                        SUMMARY_FALLBACK.to_string()
                    }
                }
            };

            let section_ctx = SectionContext {
                prompt,
                outline,
                summary: &summary,
                recent_text: tail_chars(&text, *self.config.tail_window_chars()),
                beat,
                index,
            };
            let section = self.write_section(&section_ctx).await?;

            if !text.is_empty() {
                text.push_str(self.config.section_break());
            }
            text.push_str(&section);
            ctx.emit(PipelineEvent::SectionWritten {
                task_id: ctx.task_id(),
                beat: index,
                chars: section.chars().count(),
            });
            sections.push(section);
        }

        Ok(StoryDraft {
            outline: outline.clone(),
            sections,
            text,
        })
    }

    /// Summarize the story so far.
    ///
    /// # Errors
    ///
    /// Every failure is reported as [`GenerationErrorKind::Summary`].
    #[instrument(skip_all, fields(chars = story_so_far.len()))]
    pub async fn summarize(&self, story_so_far: &str) -> Result<String, GenerationError> {
        let request = GenerateRequest {
            messages: vec![Message::user(summary_prompt(story_so_far))],
            temperature: Some(*self.config.summary_temperature()),
            max_tokens: Some(*self.config.summary_max_tokens()),
            ..Default::default()
        };

        let response = self
            .generator
            .generate(&request)
            .await
            .map_err(|e| GenerationError::new(GenerationErrorKind::Summary(e.to_string())))?;

        let summary = response.text().unwrap_or_default().trim().to_string();
        if summary.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::Summary(
                "model returned an empty summary".to_string(),
            )));
        }
        debug!(summary_chars = summary.len(), "Rolling summary ready");
        Ok(summary)
    }

    async fn write_section(&self, ctx: &SectionContext<'_>) -> Result<String, GenerationError> {
        let index = ctx.index;
        let section_failed = |reason: String| {
            GenerationError::new(GenerationErrorKind::Section { index, reason })
        };

        let request = GenerateRequest {
            messages: vec![
                Message::system(SYSTEM_INSTRUCTION),
                Message::user(section_prompt(ctx)),
            ],
            temperature: Some(*self.config.section_temperature()),
            max_tokens: Some(*self.config.section_max_tokens()),
            response_schema: Some(section_schema()),
            ..Default::default()
        };

        let response = self
            .generator
            .generate(&request)
            .await
            .map_err(|e| section_failed(e.to_string()))?;
        let payload = structured_payload(&response).map_err(|e| section_failed(e.to_string()))?;

        let section = payload
            .get("section")
            .and_then(Value::as_str)
            .ok_or_else(|| section_failed("expected a \"section\" string".to_string()))?
            .trim()
            .to_string();

        if section.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptySection(index)));
        }
        Ok(section)
    }
}

/// The last `n` characters of `text`, cut on a char boundary.
pub(crate) fn tail_chars(text: &str, n: usize) -> &str {
    let count = text.chars().count();
    if count <= n {
        return text;
    }
    let start = text
        .char_indices()
        .nth(count - n)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    &text[start..]
}

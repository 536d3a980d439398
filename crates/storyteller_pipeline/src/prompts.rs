//! Prompt text and response schemas for the story model.

use serde_json::{Value, json};
use storyteller_core::Outline;

/// Summary shown to the first section, before any text exists.
pub const FIRST_SUMMARY: &str = "The story has not yet begun.";

/// Summary substituted when a rolling summary request fails.
pub const SUMMARY_FALLBACK: &str = "No summary available.";

pub(crate) const SYSTEM_INSTRUCTION: &str = "You write sleep stories: gentle, \
age-appropriate narratives read aloud to help a listener fall asleep. Stories \
contain no conflict, danger, or suspense. Language is slow, sensory, and \
soothing, and each part of the story is calmer than the one before.";

pub(crate) fn outline_prompt(prompt: &str, beat_count: usize) -> String {
    format!(
        "Create a {beat_count}-point outline for a 30-minute sleep story about: {prompt}\n\n\
         The outline should follow a gradual unwind, moving from a calm, grounded \
         opening toward a soft, dreamlike ending. Weave in gentle mindfulness cues \
         such as noticing the breath, the weight of the body, or quiet sounds. \
         Each point is one short sentence describing what happens in that part of \
         the story."
    )
}

pub(crate) fn outline_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "outline": {
                "type": "ARRAY",
                "items": {"type": "STRING"}
            }
        },
        "required": ["outline"]
    })
}

pub(crate) fn summary_prompt(story_so_far: &str) -> String {
    format!(
        "Summarize the sleep story below in a short paragraph. Name the \
         characters, describe where they are now, and list the key events so \
         far.\n\n---\n{story_so_far}\n---"
    )
}

pub(crate) struct SectionContext<'a> {
    pub prompt: &'a str,
    pub outline: &'a Outline,
    pub summary: &'a str,
    pub recent_text: &'a str,
    pub beat: &'a str,
    pub index: usize,
}

pub(crate) fn section_prompt(ctx: &SectionContext<'_>) -> String {
    let recent = if ctx.recent_text.is_empty() {
        "(nothing yet)"
    } else {
        ctx.recent_text
    };
    format!(
        "Original request: {prompt}\n\n\
         Full outline:\n{outline}\n\n\
         Summary of the story so far: {summary}\n\n\
         The last words of the story so far:\n{recent}\n\n\
         Write part {number} of {total} of the story, covering this point:\n{beat}\n\n\
         Continue seamlessly from the last words. Use rich sensory language in the \
         present tense. Keep everything peaceful and free of conflict, and let this \
         part feel a little more relaxing than the one before.",
        prompt = ctx.prompt,
        outline = ctx.outline.numbered(),
        summary = ctx.summary,
        number = ctx.index + 1,
        total = ctx.outline.len(),
        beat = ctx.beat,
    )
}

pub(crate) fn section_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "section": {"type": "STRING"}
        },
        "required": ["section"]
    })
}

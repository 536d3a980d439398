//! Story narration: sentence chunking, synthesis, and audio persistence.

use crate::{NarrationMode, PipelineEvent, RunContext, SpeechConfig};
use rand::seq::SliceRandom;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use storyteller_core::{
    AudioEncoding, AudioSegment, LongFormRequest, OperationHandle, OperationState, SpeechRequest,
    Voice,
};
use storyteller_error::{StorytellerResult, SynthesisError, SynthesisErrorKind};
use storyteller_interface::{AudioStore, LongFormSynthesizer, SpeechSynthesizer};
use storyteller_storage::story_object_name;
use tracing::{debug, info, instrument};

/// Sentence terminator with trailing closers and whitespace, or a paragraph break.
static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[.!?…]+["'”’)\]]*\s+|\n\s*\n"#).expect("Valid sentence boundary regex")
});

/// Every UTF-8 char fits in this many bytes.
const MIN_CHUNK_BYTES: usize = 4;

/// Split text into sentence-aligned chunks of at most `max_bytes` bytes.
///
/// Whole sentences are packed greedily and joined by single spaces. A
/// sentence longer than the ceiling is broken at the last whitespace that
/// fits, or at a char boundary when there is none.
///
/// # Examples
///
/// ```
/// use storyteller_pipeline::chunk_text;
///
/// let chunks = chunk_text("The moon rises. The lake is still. You breathe slowly.", 36);
/// assert_eq!(chunks, vec!["The moon rises. The lake is still.", "You breathe slowly."]);
///
/// assert!(chunk_text("   ", 100).is_empty());
/// ```
pub fn chunk_text(text: &str, max_bytes: usize) -> Vec<String> {
    let max_bytes = max_bytes.max(MIN_CHUNK_BYTES);
    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in split_sentences(text) {
        for piece in split_oversized(sentence, max_bytes) {
            if !current.is_empty() && current.len() + 1 + piece.len() > max_bytes {
                chunks.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(piece);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_END.find_iter(text) {
        let sentence = text[start..boundary.end()].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = boundary.end();
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }
    sentences
}

fn split_oversized(sentence: &str, max_bytes: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = sentence.trim();

    while rest.len() > max_bytes {
        let mut boundary = max_bytes;
        while !rest.is_char_boundary(boundary) {
            boundary -= 1;
        }
        let cut = match rest[..boundary].rfind(char::is_whitespace) {
            Some(i) if i > 0 => i,
            _ => boundary,
        };
        let (piece, tail) = rest.split_at(cut);
        let piece = piece.trim_end();
        if !piece.is_empty() {
            pieces.push(piece);
        }
        rest = tail.trim_start();
    }

    if !rest.is_empty() {
        pieces.push(rest);
    }
    pieces
}

/// Converts story text into a stored narration.
#[derive(Clone)]
pub struct Narrator {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    long_form: Option<Arc<dyn LongFormSynthesizer>>,
    store: Arc<dyn AudioStore>,
    config: SpeechConfig,
}

impl Narrator {
    /// Create a narrator for chunked synthesis.
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        store: Arc<dyn AudioStore>,
        config: SpeechConfig,
    ) -> Self {
        Self {
            synthesizer,
            long_form: None,
            store,
            config,
        }
    }

    /// Attach a long-form backend, used when the mode is [`NarrationMode::LongForm`].
    pub fn with_long_form(mut self, long_form: Arc<dyn LongFormSynthesizer>) -> Self {
        self.long_form = Some(long_form);
        self
    }

    /// Narration settings.
    pub fn config(&self) -> &SpeechConfig {
        &self.config
    }

    /// Voice for the next task.
    ///
    /// Draws from the configured pool when randomization is on and the pool
    /// is non-empty, otherwise the fixed voice.
    pub fn pick_voice(&self) -> Voice {
        let name = if *self.config.randomize_voice() {
            self.config
                .voices()
                .choose(&mut rand::thread_rng())
                .unwrap_or(self.config.voice())
        } else {
            self.config.voice()
        };
        Voice::new(name.as_str())
    }

    /// Narrate `text` and return the public URL of the stored audio.
    ///
    /// # Errors
    ///
    /// Returns a synthesis error when the text is empty, any chunk fails,
    /// the audio cannot be persisted, or the long-form operation fails or
    /// times out. Nothing is persisted unless every chunk succeeded.
    #[instrument(skip_all, fields(task_id = %ctx.task_id(), mode = ?self.config.mode(), chars = text.len()))]
    pub async fn narrate(&self, text: &str, ctx: &RunContext<'_>) -> StorytellerResult<String> {
        let voice = self.pick_voice();
        info!(voice = %voice.name, "Narrating story");

        let url = match self.config.mode() {
            NarrationMode::Chunked => self.narrate_chunked(text, &voice, ctx).await?,
            NarrationMode::LongForm => self.narrate_long_form(text, &voice).await?,
        };

        ctx.emit(PipelineEvent::AudioStored {
            task_id: ctx.task_id(),
            url: url.clone(),
        });
        Ok(url)
    }

    async fn narrate_chunked(
        &self,
        text: &str,
        voice: &Voice,
        ctx: &RunContext<'_>,
    ) -> StorytellerResult<String> {
        let chunks = chunk_text(text, *self.config.chunk_max_bytes());
        if chunks.is_empty() {
            return Err(SynthesisError::new(SynthesisErrorKind::NoChunks).into());
        }

        let limit = self.synthesizer.max_input_bytes();
        let total = chunks.len();
        debug!(total, limit, "Text chunked for synthesis");

        let mut segments = Vec::with_capacity(total);
        for (index, chunk) in chunks.iter().enumerate() {
            if chunk.len() > limit {
                return Err(SynthesisError::new(SynthesisErrorKind::ChunkTooLarge {
                    index,
                    size: chunk.len(),
                    limit,
                })
                .into());
            }

            let request = SpeechRequest::new(chunk.as_str(), voice.clone())
                .with_encoding(AudioEncoding::Mp3)
                .with_speaking_rate(*self.config.speaking_rate())
                .with_pitch(*self.config.pitch());
            let bytes = self.synthesizer.synthesize(&request).await?;

            ctx.emit(PipelineEvent::ChunkSynthesized {
                task_id: ctx.task_id(),
                index,
                total,
                bytes: bytes.len(),
            });
            segments.push(AudioSegment { index, bytes });
        }

        let audio = assemble(segments, total)?;
        let name = story_object_name(AudioEncoding::Mp3);
        let stored = self
            .store
            .put(&name, audio, AudioEncoding::Mp3.mime_type())
            .await
            .map_err(|e| SynthesisError::new(SynthesisErrorKind::Persist(e.to_string())))?;
        Ok(stored.url)
    }

    async fn narrate_long_form(&self, text: &str, voice: &Voice) -> StorytellerResult<String> {
        let long_form = self
            .long_form
            .as_ref()
            .ok_or_else(|| SynthesisError::new(SynthesisErrorKind::LongFormUnavailable))?;
        if text.trim().is_empty() {
            return Err(SynthesisError::new(SynthesisErrorKind::NoChunks).into());
        }

        let name = story_object_name(AudioEncoding::Linear16);
        let request = LongFormRequest {
            text: text.to_string(),
            voice: voice.clone(),
            speaking_rate: *self.config.speaking_rate(),
            output_uri: self.store.location_uri(&name),
        };

        let operation = long_form.start(&request).await?;
        info!(operation = %operation.name, "Long-form synthesis started");

        let interval = Duration::from_secs(*self.config.poll_interval_secs());
        let timeout_secs = *self.config.long_form_timeout_secs();
        let wait = await_operation(&**long_form, &operation, interval);

        match tokio::time::timeout(Duration::from_secs(timeout_secs), wait).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(SynthesisError::new(SynthesisErrorKind::Timeout {
                    operation: operation.name.clone(),
                    seconds: timeout_secs,
                })
                .into());
            }
        }

        Ok(self.store.public_url(&name))
    }
}

/// Poll until the operation finishes.
async fn await_operation(
    long_form: &dyn LongFormSynthesizer,
    operation: &OperationHandle,
    interval: Duration,
) -> StorytellerResult<()> {
    loop {
        match long_form.poll(operation).await? {
            OperationState::Done => return Ok(()),
            OperationState::Failed(message) => {
                return Err(SynthesisError::new(SynthesisErrorKind::Operation(message)).into());
            }
            OperationState::Running => {
                debug!(operation = %operation.name, "Long-form synthesis still running");
                tokio::time::sleep(interval).await;
            }
        }
    }
}

/// Join segments in index order, checking none went missing.
fn assemble(mut segments: Vec<AudioSegment>, expected: usize) -> Result<Vec<u8>, SynthesisError> {
    if segments.len() != expected {
        return Err(SynthesisError::new(SynthesisErrorKind::SegmentMismatch {
            expected,
            actual: segments.len(),
        }));
    }
    segments.sort_by_key(|s| s.index);
    Ok(segments.into_iter().flat_map(|s| s.bytes).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(s: &str) -> String {
        s.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_split_sentences_handles_quotes_and_paragraphs() {
        let sentences = split_sentences("She whispers, \"Rest now.\" The fire glows\n\nA new day. Done");
        assert_eq!(
            sentences,
            vec!["She whispers, \"Rest now.\"", "The fire glows", "A new day.", "Done"]
        );
    }

    #[test]
    fn test_section_break_becomes_its_own_sentence() {
        let sentences = split_sentences("The boat drifts.\n\n...\n\nThe shore appears.");
        assert_eq!(sentences, vec!["The boat drifts.", "...", "The shore appears."]);
    }

    #[test]
    fn test_chunks_respect_ceiling_and_preserve_text() {
        let text = "The forest is quiet tonight. ".repeat(400)
            + "Moss softens every step you take. "
            + &"Breathe in slowly… and out. ".repeat(300);
        let chunks = chunk_text(&text, 4500);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.len() <= 4500 && !c.is_empty()));
        assert!(chunks.iter().all(|c| c.trim() == c.as_str()));
        assert_eq!(normalized(&chunks.join(" ")), normalized(&text));
    }

    #[test]
    fn test_long_sentence_splits_at_whitespace() {
        let sentence = "drift ".repeat(30);
        let chunks = chunk_text(&sentence, 20);
        assert!(chunks.iter().all(|c| c.len() <= 20));
        assert!(chunks.iter().all(|c| !c.starts_with(' ') && !c.ends_with(' ')));
        assert_eq!(normalized(&chunks.join(" ")), normalized(&sentence));
    }

    #[test]
    fn test_unbroken_text_splits_on_char_boundary() {
        let word = "é".repeat(10);
        let chunks = chunk_text(&word, 5);
        assert!(chunks.iter().all(|c| c.len() <= 5));
        assert_eq!(chunks.concat(), word);
    }

    #[test]
    fn test_non_empty_input_yields_a_chunk() {
        assert_eq!(chunk_text("Sleep", 4500), vec!["Sleep"]);
    }

    #[test]
    fn test_assemble_orders_segments() {
        let segments = vec![
            AudioSegment { index: 1, bytes: vec![3, 4] },
            AudioSegment { index: 0, bytes: vec![1, 2] },
        ];
        assert_eq!(assemble(segments, 2).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_assemble_detects_missing_segment() {
        let segments = vec![AudioSegment { index: 0, bytes: vec![1] }];
        let err = assemble(segments, 2).unwrap_err();
        assert_eq!(
            err.kind,
            SynthesisErrorKind::SegmentMismatch { expected: 2, actual: 1 }
        );
    }
}

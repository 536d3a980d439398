//! Speech synthesis error types.

/// Failure conditions of narration synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SynthesisErrorKind {
    /// Transport-level failure
    #[display("Synthesis request failed: {}", _0)]
    Request(String),
    /// Non-success HTTP status from the speech endpoint
    #[display("HTTP {} error: {}", status_code, message)]
    HttpStatus {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason
        message: String,
    },
    /// Response carried no audio content
    #[display("Response carried no audio content")]
    MissingAudio,
    /// Audio payload could not be decoded
    #[display("Audio decode error: {}", _0)]
    Decode(String),
    /// Story text produced no chunks
    #[display("Story text produced no chunks to narrate")]
    NoChunks,
    /// Chunk too large for the provider
    #[display("Chunk {} is {} bytes, limit is {}", index, size, limit)]
    ChunkTooLarge {
        /// Chunk index
        index: usize,
        /// Chunk size in bytes
        size: usize,
        /// Provider limit in bytes
        limit: usize,
    },
    /// Segment count did not match chunk count
    #[display("Expected {} audio segments, got {}", expected, actual)]
    SegmentMismatch {
        /// Number of chunks submitted
        expected: usize,
        /// Number of segments produced
        actual: usize,
    },
    /// Persisting the assembled audio failed
    #[display("Failed to persist audio: {}", _0)]
    Persist(String),
    /// Long-running synthesis operation reported an error
    #[display("Long-form operation failed: {}", _0)]
    Operation(String),
    /// Long-running synthesis operation did not finish in time
    #[display("Long-form operation {} timed out after {}s", operation, seconds)]
    Timeout {
        /// Operation name
        operation: String,
        /// Elapsed seconds
        seconds: u64,
    },
    /// Long-form mode selected without a long-form synthesizer
    #[display("Long-form synthesis is not configured")]
    LongFormUnavailable,
}

/// Synthesis error with source location tracking.
///
/// # Examples
///
/// ```
/// use storyteller_error::{SynthesisError, SynthesisErrorKind};
///
/// let err = SynthesisError::new(SynthesisErrorKind::NoChunks);
/// assert!(format!("{}", err).contains("no chunks"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Synthesis Error: {} at line {} in {}", kind, line, file)]
pub struct SynthesisError {
    /// The kind of error that occurred
    pub kind: SynthesisErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SynthesisError {
    /// Create a new SynthesisError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SynthesisErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

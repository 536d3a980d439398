//! Text generation error types.

/// Failure conditions of a text generation call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Transport-level failure (connect, timeout, TLS)
    #[display("Generation request failed: {}", _0)]
    Request(String),
    /// Non-success HTTP status from the model endpoint
    #[display("HTTP {} error: {}", status_code, message)]
    HttpStatus {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason
        message: String,
    },
    /// Response carried no candidates
    #[display("Model returned no candidates")]
    NoCandidates,
    /// Response carried no usable output
    #[display("Model returned no output")]
    EmptyOutput,
    /// Structured payload did not match the requested schema
    #[display("Malformed structured payload: {}", _0)]
    MalformedPayload(String),
    /// Outline decoded to zero usable beats
    #[display("Outline contained no beats")]
    EmptyOutline,
    /// A section came back empty
    #[display("Section {} was empty", _0)]
    EmptySection(usize),
    /// A section request failed
    #[display("Section {} failed: {}", index, reason)]
    Section {
        /// Zero-based beat index
        index: usize,
        /// Underlying failure
        reason: String,
    },
    /// Rolling summary request failed
    #[display("Summary failed: {}", _0)]
    Summary(String),
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use storyteller_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::NoCandidates);
/// assert!(format!("{}", err).contains("no candidates"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether this failure came from a rolling summary request.
    ///
    /// Summary failures are recovered locally and never fail a task.
    pub fn is_summary(&self) -> bool {
        matches!(self.kind, GenerationErrorKind::Summary(_))
    }
}

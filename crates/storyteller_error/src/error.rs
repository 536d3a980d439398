//! Top-level error wrapper types.

use crate::{
    ConfigError, DatabaseError, GenerationError, ServerError, StorageError, SynthesisError,
};

/// Every failure the service can surface.
///
/// # Examples
///
/// ```
/// use storyteller_error::{StorytellerError, ConfigError};
///
/// let config_err = ConfigError::new("bucket missing");
/// let err: StorytellerError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StorytellerErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Text generation error (outline, section, summary)
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Speech synthesis error
    #[from(SynthesisError)]
    Synthesis(SynthesisError),
    /// Object storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Task store error
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// HTTP server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Storyteller error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storyteller_error::{StorytellerErrorKind, StorytellerResult, DatabaseError, DatabaseErrorKind};
///
/// fn lookup() -> StorytellerResult<()> {
///     Err(DatabaseError::new(DatabaseErrorKind::NotFound(42)))?
/// }
///
/// let err = lookup().unwrap_err();
/// assert!(err.is_not_found());
/// assert!(matches!(err.kind(), StorytellerErrorKind::Database(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storyteller Error: {}", _0)]
pub struct StorytellerError(Box<StorytellerErrorKind>);

impl StorytellerError {
    /// Create a new error from a kind.
    pub fn new(kind: StorytellerErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StorytellerErrorKind {
        &self.0
    }

    /// True when the error reports an unknown task id.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind(), StorytellerErrorKind::Database(e) if e.is_not_found())
    }
}

// Generic From implementation for any type that converts to StorytellerErrorKind
impl<T> From<T> for StorytellerError
where
    T: Into<StorytellerErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storyteller operations.
pub type StorytellerResult<T> = std::result::Result<T, StorytellerError>;

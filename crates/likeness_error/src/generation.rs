//! Clip generation attempt errors.

/// Ways a single clip-generation attempt can fail.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Provider accepted the request but returned no operation handle
    #[display("Expected the model to return an operation")]
    MissingOperation,
    /// Operation completed with a provider-reported error
    #[display("Video generation failed: {}", _0)]
    ProviderFailure(String),
    /// Operation completed successfully but carried no media part
    #[display("Failed to find the generated video in operation output")]
    MissingMedia,
    /// Operation did not complete within the configured poll budget
    #[display("Operation {} did not complete within {} seconds", operation, elapsed_secs)]
    PollTimeout {
        /// Remote operation identifier
        operation: String,
        /// Seconds spent polling before giving up
        elapsed_secs: u64,
    },
    /// Generated clip scored below the identity threshold
    #[display("Generated clip failed consistency check: {}", details)]
    ConsistencyRejected {
        /// Similarity score
        score: f64,
        /// Threshold that was not met
        threshold: f64,
        /// Human-readable details from the validator
        details: String,
    },
}

/// Generation error with location tracking.
///
/// # Examples
///
/// ```
/// use likeness_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::ProviderFailure("quota".into()));
/// assert!(format!("{}", err).contains("quota"));
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
    /// Create a new generation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

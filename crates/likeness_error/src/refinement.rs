//! Likeness refinement errors.

/// Refinement failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RefinementErrorKind {
    /// Completion succeeded but produced no image part
    #[display("No refined image returned from the model")]
    NoImageReturned,
    /// Rate limiting persisted through every attempt
    #[display("Failed to refine likeness after {} attempts: {}", attempts, last_message)]
    RetriesExhausted {
        /// Number of attempts made
        attempts: usize,
        /// Message of the final rate-limit error
        last_message: String,
    },
}

/// Refinement error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Refinement Error: {} at line {} in {}", kind, line, file)]
pub struct RefinementError {
    /// The kind of error that occurred
    pub kind: RefinementErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RefinementError {
    /// Create a new refinement error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RefinementErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

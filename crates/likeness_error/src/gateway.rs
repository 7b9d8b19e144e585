//! Gateway error types and provider error classification.

/// Closed set of error classes orchestration logic reasons about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ErrorClass {
    /// Provider quota or rate limit hit; recoverable after a delay
    #[display("rate-limited")]
    RateLimited,
    /// Temporary provider or network failure
    #[display("transient")]
    Transient,
    /// Permanent failure; retrying will not help
    #[display("fatal")]
    Fatal,
}

/// Gateway-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GatewayErrorKind {
    /// API key not found in environment
    #[display("GEMINI_API_KEY (or GOOGLE_API_KEY) environment variable not set")]
    MissingApiKey,
    /// Failed to construct the HTTP client
    #[display("Failed to create gateway client: {}", _0)]
    ClientCreation(String),
    /// Request never reached the provider or the connection dropped
    #[display("Transport failure: {}", _0)]
    Transport(String),
    /// Provider answered with a non-success status
    #[display("HTTP {} error: {}", status_code, message)]
    HttpStatus {
        /// HTTP status code
        status_code: u16,
        /// Provider-reported status or reason (e.g. `RESOURCE_EXHAUSTED`)
        reason: Option<String>,
        /// Error message
        message: String,
    },
    /// Response body did not have the expected shape
    #[display("Malformed provider response: {}", _0)]
    MalformedResponse(String),
    /// Input the provider path cannot accept
    #[display("Unsupported input: {}", _0)]
    UnsupportedInput(String),
}

impl GatewayErrorKind {
    /// Normalize the error into an [`ErrorClass`].
    pub fn class(&self) -> ErrorClass {
        match self {
            GatewayErrorKind::HttpStatus {
                status_code,
                reason,
                ..
            } => {
                if *status_code == 429 || reason.as_deref().is_some_and(is_rate_limit_reason) {
                    ErrorClass::RateLimited
                } else if matches!(*status_code, 408 | 500 | 502 | 503 | 504) {
                    ErrorClass::Transient
                } else {
                    ErrorClass::Fatal
                }
            }
            GatewayErrorKind::Transport(_) => ErrorClass::Transient,
            _ => ErrorClass::Fatal,
        }
    }

    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        self.class() != ErrorClass::Fatal
    }
}

fn is_rate_limit_reason(reason: &str) -> bool {
    let upper = reason.to_ascii_uppercase();
    upper == "RESOURCE_EXHAUSTED" || upper.starts_with("RATE_LIMIT") || upper == "RATELIMIT"
}

/// Gateway error with source location tracking.
///
/// # Examples
///
/// ```
/// use likeness_error::{ErrorClass, GatewayError, GatewayErrorKind};
///
/// let err = GatewayError::new(GatewayErrorKind::HttpStatus {
///     status_code: 429,
///     reason: Some("RESOURCE_EXHAUSTED".to_string()),
///     message: "Quota exceeded".to_string(),
/// });
/// assert_eq!(err.kind.class(), ErrorClass::RateLimited);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Gateway Error: {} at line {} in {}", kind, line, file)]
pub struct GatewayError {
    /// The kind of error that occurred
    pub kind: GatewayErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GatewayError {
    /// Create a new GatewayError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GatewayErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Trait for errors that support retry logic.
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;

    /// Classification used to pick a recovery strategy.
    fn class(&self) -> ErrorClass;
}

impl RetryableError for GatewayError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    fn class(&self) -> ErrorClass {
        self.kind.class()
    }
}

//! Top-level error wrapper types.

use crate::{
    ConfigError, ErrorClass, GatewayError, GenerationError, HttpError, JsonError, MediaError,
    RefinementError, RequestError, StorageError,
};

/// Every error condition the engine can surface.
///
/// # Examples
///
/// ```
/// use likeness_error::{LikenessError, HttpError};
///
/// let err: LikenessError = HttpError::new("Connection reset").into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum LikenessErrorKind {
    /// Transport error while fetching media
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Request failed boundary validation
    #[from(RequestError)]
    Request(RequestError),
    /// Malformed data URI or media payload
    #[from(MediaError)]
    Media(MediaError),
    /// Remote model gateway error
    #[from(GatewayError)]
    Gateway(GatewayError),
    /// Clip generation attempt failure
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Likeness refinement failure
    #[from(RefinementError)]
    Refinement(RefinementError),
    /// Profile storage error
    #[from(StorageError)]
    Storage(StorageError),
}

/// Engine error with kind discrimination.
///
/// # Examples
///
/// ```
/// use likeness_error::{ConfigError, LikenessResult};
///
/// fn load() -> LikenessResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(load().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Likeness Error: {}", _0)]
pub struct LikenessError(Box<LikenessErrorKind>);

impl LikenessError {
    /// Create a new error from a kind.
    pub fn new(kind: LikenessErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &LikenessErrorKind {
        &self.0
    }

    /// Classification of the error for retry decisions.
    ///
    /// Only gateway errors carry a provider classification; transport errors
    /// raised while downloading media are transient, everything else is fatal.
    pub fn class(&self) -> ErrorClass {
        match self.kind() {
            LikenessErrorKind::Gateway(e) => e.kind.class(),
            LikenessErrorKind::Http(_) => ErrorClass::Transient,
            _ => ErrorClass::Fatal,
        }
    }

    /// True when the provider rejected the call because of rate limiting.
    pub fn is_rate_limited(&self) -> bool {
        self.class() == ErrorClass::RateLimited
    }
}

// Generic From implementation for any type that converts to LikenessErrorKind
impl<T> From<T> for LikenessError
where
    T: Into<LikenessErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for engine operations.
pub type LikenessResult<T> = std::result::Result<T, LikenessError>;

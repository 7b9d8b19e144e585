//! Media payload errors.

/// Problems with data URIs and inline media.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum MediaErrorKind {
    /// Input is not a `data:<mime>;base64,<data>` URI
    #[display("Invalid data URI: {}", _0)]
    InvalidDataUri(String),
    /// Data URI carries no MIME type
    #[display("Could not determine content type from data URI")]
    MissingContentType,
    /// Base64 payload failed to decode
    #[display("Base64 decode error: {}", _0)]
    Base64Decode(String),
}

/// Media error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Media Error: {} at line {} in {}", kind, line, file)]
pub struct MediaError {
    /// The kind of error that occurred
    pub kind: MediaErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl MediaError {
    /// Create a new media error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: MediaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

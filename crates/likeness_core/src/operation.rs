//! Long-running operation snapshots returned by the provider.

use serde::{Deserialize, Serialize};

/// Media produced by a completed operation.
///
/// The URI is a transient provider URL, not a data URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaResult {
    /// Remote location of the generated media
    pub media_uri: String,
    /// MIME type reported by the provider
    pub content_type: String,
}

/// Error reported by the provider for a finished operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationFailure {
    /// Provider message, surfaced verbatim
    pub message: String,
}

/// Snapshot of a remote long-running operation.
///
/// The client only observes state: a snapshot moves from pending to done
/// (with either `output` or `error`) and never back.
///
/// # Examples
///
/// ```
/// use likeness_core::Operation;
///
/// let op = Operation::pending("operations/abc");
/// assert!(!op.done);
/// assert!(op.output.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Provider-assigned operation name
    pub id: String,
    /// Whether the operation has finished
    pub done: bool,
    /// Generated media, once finished successfully
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<MediaResult>,
    /// Provider error, once finished unsuccessfully
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationFailure>,
}

impl Operation {
    /// Handle for a freshly submitted operation.
    pub fn pending(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            done: false,
            output: None,
            error: None,
        }
    }

    /// Finished snapshot carrying media.
    pub fn succeeded(id: impl Into<String>, output: MediaResult) -> Self {
        Self {
            id: id.into(),
            done: true,
            output: Some(output),
            error: None,
        }
    }

    /// Finished snapshot carrying a provider error.
    pub fn failed(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            done: true,
            output: None,
            error: Some(OperationFailure {
                message: message.into(),
            }),
        }
    }
}

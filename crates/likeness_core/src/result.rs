//! Results produced by the orchestration layer.

use crate::DataUri;
use serde::{Deserialize, Serialize};

/// Outcome of comparing generated media with an identity.
///
/// A non-passing result is a normal value, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyResult {
    /// Cosine similarity between identity and generated content
    pub score: f64,
    /// Whether `score >= threshold`
    pub passed: bool,
    /// Threshold the score was compared against
    pub threshold: f64,
    /// Human-readable explanation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ConsistencyResult {
    /// Default non-passing result used when validation itself broke.
    pub fn validation_error(threshold: f64, message: impl std::fmt::Display) -> Self {
        Self {
            score: 0.0,
            passed: false,
            threshold,
            details: Some(format!("Validation error: {}", message)),
        }
    }
}

/// One successfully generated clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipResult {
    /// The clip, downloaded and re-encoded
    pub media_uri: DataUri,
    /// Similarity to the identity, when validation ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consistency_score: Option<f64>,
}

/// Clip generation response: clips in completion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClipBatch {
    /// Successfully generated clips
    pub clips: Vec<ClipResult>,
}

/// Likeness refinement response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineResponse {
    /// The edited image
    pub refined_image_uri: DataUri,
}

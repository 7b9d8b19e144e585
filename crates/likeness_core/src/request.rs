//! Request types accepted at the engine boundary.

use crate::{DataUri, EmotionIntensity};
use derive_builder::Builder;
use derive_getters::Getters;
use likeness_error::{RequestError, RequestErrorKind};
use serde::{Deserialize, Serialize};

/// Threshold applied when a validation request does not name one.
pub const DEFAULT_CONSISTENCY_THRESHOLD: f64 = 0.85;

fn default_threshold() -> f64 {
    DEFAULT_CONSISTENCY_THRESHOLD
}

/// Request to synthesize clips of an actor showing a target emotion.
///
/// Immutable once built; the orchestrator only reads it.
///
/// # Examples
///
/// ```
/// use likeness_core::{ClipRequest, DataUri, EmotionIntensity};
///
/// let request = ClipRequest::builder()
///     .source_image(DataUri::new("image/png", vec![1, 2, 3]))
///     .target_emotion("Happy")
///     .clip_count(3u32)
///     .intensity(EmotionIntensity::Subtle)
///     .build()
///     .unwrap();
///
/// assert_eq!(*request.clip_count(), 3);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct ClipRequest {
    /// Frame of the actor to animate
    source_image: DataUri,
    /// Emotion the clips should show
    target_emotion: String,
    /// Number of concurrent generation attempts
    #[builder(default = "1")]
    clip_count: u32,
    /// Identity embedding used for the optional consistency check
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    identity_embedding: Option<Vec<f32>>,
    /// Reference frames of the actor
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reference_frames: Option<Vec<DataUri>>,
    /// Requested expression intensity
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    intensity: Option<EmotionIntensity>,
    /// Whether to score each clip against the identity embedding
    #[builder(default)]
    #[serde(default)]
    validate_consistency: bool,
}

impl ClipRequest {
    /// Creates a new builder for `ClipRequest`.
    pub fn builder() -> ClipRequestBuilder {
        ClipRequestBuilder::default()
    }

    /// Embedding to validate against, when validation was requested and possible.
    pub fn validation_embedding(&self) -> Option<&[f32]> {
        if self.validate_consistency {
            self.identity_embedding.as_deref()
        } else {
            None
        }
    }

    /// Boundary validation.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank emotion, a zero clip count or an empty
    /// identity embedding.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.target_emotion.trim().is_empty() {
            return Err(RequestError::new(RequestErrorKind::MissingField(
                "targetEmotion".to_string(),
            )));
        }
        if self.clip_count == 0 {
            return Err(RequestError::invalid(
                "clipCount",
                "must request at least one clip",
            ));
        }
        if self.identity_embedding.as_ref().is_some_and(Vec::is_empty) {
            return Err(RequestError::invalid(
                "identityEmbedding",
                "embedding must not be empty",
            ));
        }
        Ok(())
    }
}

/// Request to edit a likeness image with natural-language instructions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineRequest {
    /// Image to edit
    pub base_image: DataUri,
    /// What to change
    pub instructions: String,
}

impl RefineRequest {
    /// Boundary validation.
    ///
    /// # Errors
    ///
    /// Returns an error when the instructions are blank.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.instructions.trim().is_empty() {
            return Err(RequestError::new(RequestErrorKind::MissingField(
                "instructions".to_string(),
            )));
        }
        Ok(())
    }
}

/// Request to score generated media against an identity.
///
/// # Examples
///
/// ```
/// use likeness_core::{DataUri, ValidateRequest};
///
/// let json = r#"{"generatedMediaUri":"data:video/mp4;base64,AAAA","identityEmbedding":[0.1,0.2]}"#;
/// let request: ValidateRequest = serde_json::from_str(json).unwrap();
/// assert_eq!(request.threshold, 0.85);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    /// Media to check
    pub generated_media_uri: DataUri,
    /// Identity embedding to compare against
    pub identity_embedding: Vec<f32>,
    /// Optional text description of the identity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_description: Option<String>,
    /// Minimum passing score
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl ValidateRequest {
    /// Boundary validation.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty embedding or a threshold outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.identity_embedding.is_empty() {
            return Err(RequestError::invalid(
                "identityEmbedding",
                "embedding must not be empty",
            ));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(RequestError::invalid(
                "threshold",
                format!("must be within [0, 1], got {}", self.threshold),
            ));
        }
        Ok(())
    }
}

//! Request and response types exchanged with the gateway.

use derive_builder::Builder;
use derive_getters::Getters;
use likeness_core::DataUri;
use likeness_error::{JsonError, LikenessResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// One element of a multimodal prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptPart {
    /// Prompt text
    Text(String),
    /// Inline image or video
    Media(DataUri),
}

impl PromptPart {
    /// Text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

impl From<DataUri> for PromptPart {
    fn from(uri: DataUri) -> Self {
        Self::Media(uri)
    }
}

/// What the completion must produce.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum OutputMode {
    /// Free text
    #[default]
    Text,
    /// JSON matching the given schema
    Json(serde_json::Value),
    /// Text and image modalities together
    ///
    /// Image-only output is not offered because the provider rejects it.
    TextAndImage,
}

/// Prompt completion request.
///
/// # Examples
///
/// ```
/// use likeness_interface::{CompletionRequest, OutputMode, PromptPart};
///
/// let request = CompletionRequest::builder()
///     .parts(vec![PromptPart::text("Describe this face")])
///     .output_mode(OutputMode::Json(serde_json::json!({"type": "object"})))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.parts().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct CompletionRequest {
    /// Ordered prompt parts
    parts: Vec<PromptPart>,
    /// Requested output
    #[builder(default)]
    output_mode: OutputMode,
    /// Model override; the gateway default is used otherwise
    #[builder(default, setter(into, strip_option))]
    model: Option<String>,
}

impl CompletionRequest {
    /// Creates a new builder for `CompletionRequest`.
    pub fn builder() -> CompletionRequestBuilder {
        CompletionRequestBuilder::default()
    }
}

/// Result of a completion.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Getters)]
pub struct Completion {
    /// Concatenated text parts
    text: String,
    /// Inline media parts, in response order
    media: Vec<DataUri>,
}

impl Completion {
    /// Build a completion from its parts.
    pub fn new(text: impl Into<String>, media: Vec<DataUri>) -> Self {
        Self {
            text: text.into(),
            media,
        }
    }

    /// Text-only completion.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(text, Vec::new())
    }

    /// First returned image, if any.
    pub fn first_image(&self) -> Option<&DataUri> {
        self.media.iter().find(|m| m.is_image())
    }

    /// Decode the text as JSON.
    ///
    /// Markdown code fences around the payload are tolerated.
    ///
    /// # Errors
    ///
    /// Returns a [`JsonError`] when the text does not decode into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> LikenessResult<T> {
        let body = strip_code_fence(&self.text);
        serde_json::from_str(body)
            .map_err(|e| JsonError::new(format!("Failed to decode completion: {}", e)).into())
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Long-running video generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoGenerationRequest {
    /// Generation prompt
    pub prompt: String,
    /// Optional first frame to animate
    pub image: Option<DataUri>,
}

/// Media downloaded from a provider URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedMedia {
    /// Response body
    pub bytes: Vec<u8>,
    /// `Content-Type` header, when present
    pub content_type: Option<String>,
}

impl FetchedMedia {
    /// Re-encode as a data URI, falling back to `default_type` for the MIME type.
    pub fn into_data_uri(self, default_type: &str) -> DataUri {
        let mime = self
            .content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(str::trim)
            .filter(|ct| !ct.is_empty() && *ct != "application/octet-stream")
            .unwrap_or(default_type)
            .to_string();
        DataUri::new(mime, self.bytes)
    }
}

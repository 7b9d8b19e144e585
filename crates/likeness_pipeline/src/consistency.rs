//! Identity consistency validation.

use crate::prompts;
use likeness_core::{ConsistencyResult, DataUri, ValidateRequest, cosine_similarity};
use likeness_error::{LikenessResult, RequestError};
use likeness_interface::{CompletionRequest, ModelGateway, OutputMode, PromptPart};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

#[derive(Debug, Deserialize)]
struct ContentDescription {
    description: String,
}

/// Scores generated media against an identity embedding.
///
/// The media is described in text, the description is embedded, and the
/// cosine similarity to the identity embedding is compared with a threshold.
#[derive(Debug, Clone)]
pub struct ConsistencyValidator<G> {
    gateway: G,
}

impl<G: ModelGateway> ConsistencyValidator<G> {
    /// Validator backed by `gateway`.
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Score `media` against `identity`, propagating gateway failures.
    ///
    /// # Errors
    ///
    /// Returns the gateway or decoding error that prevented scoring.
    #[instrument(skip(self, media, identity, identity_description), fields(mime = %media.mime_type()))]
    pub async fn assess(
        &self,
        media: &DataUri,
        identity: &[f32],
        identity_description: Option<&str>,
        threshold: f64,
    ) -> LikenessResult<ConsistencyResult> {
        let request = CompletionRequest::builder()
            .parts(vec![
                PromptPart::text(prompts::content_description_prompt(identity_description)),
                PromptPart::Media(media.clone()),
            ])
            .output_mode(OutputMode::Json(prompts::description_schema()))
            .build()
            .map_err(|e| RequestError::from(e.to_string()))?;

        let described: ContentDescription = self.gateway.complete(&request).await?.json()?;
        let content_embedding = self.gateway.embed(&described.description).await?;
        let score = cosine_similarity(identity, &content_embedding);
        let passed = score >= threshold;

        debug!(score, passed, "Scored content against identity");

        let details = if passed {
            format!("Content matches identity with {:.1}% similarity", score * 100.0)
        } else {
            format!(
                "Content similarity {:.1}% is below threshold {:.1}%",
                score * 100.0,
                threshold * 100.0
            )
        };

        Ok(ConsistencyResult {
            score,
            passed,
            threshold,
            details: Some(details),
        })
    }

    /// Score `media` against `identity`.
    ///
    /// Never fails: an infrastructure error becomes a non-passing result with
    /// a score of zero and the error message in `details`.
    pub async fn validate(
        &self,
        media: &DataUri,
        identity: &[f32],
        identity_description: Option<&str>,
        threshold: f64,
    ) -> ConsistencyResult {
        match self
            .assess(media, identity, identity_description, threshold)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Consistency validation failed");
                ConsistencyResult::validation_error(threshold, e)
            }
        }
    }

    /// Validate a boundary request, then score it.
    ///
    /// # Errors
    ///
    /// Only request validation errors are returned.
    pub async fn validate_request(
        &self,
        request: &ValidateRequest,
    ) -> LikenessResult<ConsistencyResult> {
        request.validate()?;
        Ok(self
            .validate(
                &request.generated_media_uri,
                &request.identity_embedding,
                request.identity_description.as_deref(),
                request.threshold,
            )
            .await)
    }
}

//! Identity embedding from reference frames.

use crate::prompts;
use likeness_core::{DataUri, IdentityEmbedding};
use likeness_error::{LikenessResult, RequestError};
use likeness_interface::{CompletionRequest, ModelGateway, OutputMode, PromptPart};
use serde::Deserialize;
use tracing::{info, instrument};

/// Most reference frames accepted per embedding.
pub const MAX_REFERENCE_FRAMES: usize = 10;

#[derive(Debug, Deserialize)]
struct FaceDescription {
    description: String,
}

/// Builds a text-proxy identity embedding.
///
/// The first frame is treated as canonical: its face is described and the
/// description is embedded. Further frames are accepted but not used.
#[derive(Debug, Clone)]
pub struct IdentityEmbedder<G> {
    gateway: G,
}

impl<G: ModelGateway> IdentityEmbedder<G> {
    /// Embedder backed by `gateway`.
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Embed the identity shown in `frames`.
    ///
    /// # Errors
    ///
    /// Returns a request error unless 1 to 10 frames are supplied, and
    /// propagates gateway failures.
    #[instrument(skip(self, frames), fields(frames = frames.len()))]
    pub async fn generate(&self, frames: &[DataUri]) -> LikenessResult<IdentityEmbedding> {
        let Some(canonical) = frames.first() else {
            return Err(RequestError::invalid("frames", "at least one reference frame is required").into());
        };
        if frames.len() > MAX_REFERENCE_FRAMES {
            return Err(RequestError::invalid(
                "frames",
                format!("at most {} reference frames are accepted", MAX_REFERENCE_FRAMES),
            )
            .into());
        }

        let request = CompletionRequest::builder()
            .parts(vec![
                PromptPart::Media(canonical.clone()),
                PromptPart::text(prompts::FACE_DESCRIPTION_PROMPT),
            ])
            .output_mode(OutputMode::Json(prompts::description_schema()))
            .build()
            .map_err(|e| RequestError::from(e.to_string()))?;

        let face: FaceDescription = self.gateway.complete(&request).await?.json()?;
        let embedding = self.gateway.embed(&face.description).await?;

        info!(dimensions = embedding.len(), "Identity embedding generated");

        Ok(IdentityEmbedding {
            embedding,
            face_description: face.description,
            consistency_score: 1.0,
            canonical_frame_index: 0,
        })
    }
}

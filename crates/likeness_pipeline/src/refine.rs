//! Likeness refinement with rate-limit backoff.

use likeness_core::{DataUri, RefineRequest, RefineResponse};
use likeness_error::{
    LikenessError, LikenessResult, RefinementError, RefinementErrorKind, RequestError,
};
use likeness_interface::{CompletionRequest, ModelGateway, OutputMode, PromptPart};
use likeness_rate_limit::{RateLimitBackoff, RefinementConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_retry2::{Retry, RetryError};
use tracing::{info, instrument, warn};

/// Edits a likeness image according to natural-language instructions.
///
/// Rate-limited attempts are retried on the [`RateLimitBackoff`] schedule.
/// Any other failure is returned immediately.
#[derive(Debug, Clone)]
pub struct LikenessRefiner<G> {
    gateway: G,
    retry: RefinementConfig,
}

impl<G: ModelGateway> LikenessRefiner<G> {
    /// Refiner using `retry` for its attempt budget and delays.
    pub fn new(gateway: G, retry: RefinementConfig) -> Self {
        Self { gateway, retry }
    }

    /// Apply `instructions` to `base_image`.
    ///
    /// # Errors
    ///
    /// - `NoImageReturned` when a completion carries no image
    /// - `RetriesExhausted` when every attempt was rate limited
    /// - the first non-rate-limit gateway error otherwise
    #[instrument(skip(self, base_image, instructions), fields(mime = %base_image.mime_type()))]
    pub async fn refine(&self, base_image: &DataUri, instructions: &str) -> LikenessResult<DataUri> {
        let request = CompletionRequest::builder()
            .parts(vec![
                PromptPart::Media(base_image.clone()),
                PromptPart::text(instructions),
            ])
            .output_mode(OutputMode::TextAndImage)
            .build()
            .map_err(|e| RequestError::from(e.to_string()))?;

        let attempts = AtomicUsize::new(0);
        let result = Retry::spawn(RateLimitBackoff::from_config(&self.retry), || async {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            match self.gateway.complete(&request).await {
                Ok(completion) => completion.first_image().cloned().ok_or_else(|| {
                    RetryError::Permanent(LikenessError::from(RefinementError::new(
                        RefinementErrorKind::NoImageReturned,
                    )))
                }),
                Err(e) if e.is_rate_limited() => {
                    warn!(attempt, error = %e, "Rate limited, backing off");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => Err(RetryError::Permanent(e)),
            }
        })
        .await;

        let attempts = attempts.load(Ordering::SeqCst);
        match result {
            Ok(image) => {
                info!(attempts, "Likeness refined");
                Ok(image)
            }
            Err(e) if e.is_rate_limited() => Err(RefinementError::new(
                RefinementErrorKind::RetriesExhausted {
                    attempts,
                    last_message: e.to_string(),
                },
            )
            .into()),
            Err(e) => Err(e),
        }
    }

    /// Validate a boundary request, then refine it.
    ///
    /// # Errors
    ///
    /// See [`LikenessRefiner::refine`].
    pub async fn refine_request(&self, request: &RefineRequest) -> LikenessResult<RefineResponse> {
        request.validate()?;
        let refined_image_uri = self
            .refine(&request.base_image, &request.instructions)
            .await?;
        Ok(RefineResponse { refined_image_uri })
    }
}

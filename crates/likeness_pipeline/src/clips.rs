//! Concurrent emotion clip generation.

use crate::{ConsistencyValidator, prompts};
use futures::stream::{FuturesUnordered, StreamExt};
use likeness_core::{ClipRequest, ClipResult, DEFAULT_CONSISTENCY_THRESHOLD, DataUri, Operation};
use likeness_error::{GenerationError, GenerationErrorKind, LikenessError, LikenessResult};
use likeness_interface::{MediaFetcher, ModelGateway, VideoGenerationRequest};
use likeness_rate_limit::LikenessConfig;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Polling and validation settings for [`ClipGenerator`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClipSettings {
    /// Delay between operation polls
    pub poll_interval: Duration,
    /// Give up on an operation after this long; `None` polls forever
    pub poll_timeout: Option<Duration>,
    /// Minimum similarity for a clip to be kept
    pub consistency_threshold: f64,
    /// MIME type used when neither provider nor download reports one
    pub default_media_type: String,
}

impl Default for ClipSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            poll_timeout: Some(Duration::from_secs(600)),
            consistency_threshold: DEFAULT_CONSISTENCY_THRESHOLD,
            default_media_type: "video/mp4".to_string(),
        }
    }
}

impl ClipSettings {
    /// Settings taken from the generation and consistency sections.
    pub fn from_config(config: &LikenessConfig) -> Self {
        Self {
            poll_interval: config.generation.poll_interval(),
            poll_timeout: config.generation.poll_timeout(),
            consistency_threshold: config.consistency.threshold,
            default_media_type: config.generation.default_media_type.clone(),
        }
    }
}

/// Generates batches of emotion clips from a source image.
///
/// Attempts run concurrently and are settled individually: the batch
/// succeeds if any attempt succeeds, and clips are returned in completion
/// order.
#[derive(Debug, Clone)]
pub struct ClipGenerator<G, F> {
    gateway: G,
    fetcher: F,
    validator: ConsistencyValidator<G>,
    settings: ClipSettings,
}

impl<G, F> ClipGenerator<G, F>
where
    G: ModelGateway + Clone,
    F: MediaFetcher,
{
    /// Generator using `gateway` for generation and validation.
    pub fn new(gateway: G, fetcher: F, settings: ClipSettings) -> Self {
        Self {
            validator: ConsistencyValidator::new(gateway.clone()),
            gateway,
            fetcher,
            settings,
        }
    }

    /// Current settings.
    pub fn settings(&self) -> &ClipSettings {
        &self.settings
    }

    /// Generate `clip_count` clips for the requested emotion.
    ///
    /// A clip count of zero yields an empty batch without contacting the
    /// provider.
    ///
    /// # Errors
    ///
    /// Returns a request error for an invalid request. When every attempt
    /// fails, returns the failure of the lowest-numbered attempt.
    #[instrument(skip(self, request), fields(emotion = %request.target_emotion(), count = request.clip_count()))]
    pub async fn generate_clips(&self, request: &ClipRequest) -> LikenessResult<Vec<ClipResult>> {
        let count = *request.clip_count() as usize;
        if count == 0 {
            return Ok(Vec::new());
        }
        request.validate()?;

        let prompt = prompts::clip_prompt(
            request.target_emotion(),
            *request.intensity(),
            request.identity_embedding().is_some(),
        );
        let prompt = prompt.as_str();

        let mut attempts: FuturesUnordered<_> = (0..count)
            .map(|index| async move { (index, self.generate_one(request, prompt, index).await) })
            .collect();

        let mut clips = Vec::with_capacity(count);
        let mut first_failure: Option<(usize, LikenessError)> = None;
        while let Some((index, outcome)) = attempts.next().await {
            match outcome {
                Ok(clip) => clips.push(clip),
                Err(e) => {
                    warn!(attempt = index, error = %e, "Clip attempt failed");
                    if first_failure.as_ref().is_none_or(|(first, _)| index < *first) {
                        first_failure = Some((index, e));
                    }
                }
            }
        }

        info!(generated = clips.len(), requested = count, "Clip batch settled");

        match first_failure {
            Some((_, e)) if clips.is_empty() => Err(e),
            _ => Ok(clips),
        }
    }

    async fn generate_one(
        &self,
        request: &ClipRequest,
        prompt: &str,
        index: usize,
    ) -> LikenessResult<ClipResult> {
        let submission = VideoGenerationRequest {
            prompt: prompt.to_string(),
            image: Some(request.source_image().clone()),
        };
        let operation = self
            .gateway
            .generate_async(&submission)
            .await?
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::MissingOperation))?;

        debug!(attempt = index, operation = %operation.id, "Video generation submitted");

        let operation = self.await_completion(operation).await?;
        if let Some(failure) = operation.error {
            return Err(GenerationError::new(GenerationErrorKind::ProviderFailure(failure.message)).into());
        }
        let output = operation
            .output
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::MissingMedia))?;

        let fallback_type = if output.content_type.is_empty() {
            self.settings.default_media_type.as_str()
        } else {
            output.content_type.as_str()
        };
        let media_uri = self
            .fetcher
            .fetch(&output.media_uri)
            .await?
            .into_data_uri(fallback_type);

        let consistency_score = match request.validation_embedding() {
            Some(identity) => self.score_clip(&media_uri, identity, index).await?,
            None => None,
        };

        Ok(ClipResult {
            media_uri,
            consistency_score,
        })
    }

    /// Poll until the operation is done or the timeout elapses.
    async fn await_completion(&self, mut operation: Operation) -> LikenessResult<Operation> {
        let started = tokio::time::Instant::now();
        while !operation.done {
            tokio::time::sleep(self.settings.poll_interval).await;
            operation = self.gateway.poll_operation(&operation).await?;
            if operation.done {
                break;
            }
            if let Some(timeout) = self.settings.poll_timeout {
                let elapsed = started.elapsed();
                if elapsed >= timeout {
                    return Err(GenerationError::new(GenerationErrorKind::PollTimeout {
                        operation: operation.id,
                        elapsed_secs: elapsed.as_secs(),
                    })
                    .into());
                }
            }
        }
        Ok(operation)
    }

    /// Rejects clips below the threshold; keeps unscored clips when scoring broke.
    async fn score_clip(
        &self,
        media: &DataUri,
        identity: &[f32],
        index: usize,
    ) -> LikenessResult<Option<f64>> {
        let threshold = self.settings.consistency_threshold;
        match self.validator.assess(media, identity, None, threshold).await {
            Ok(result) if result.passed => Ok(Some(result.score)),
            Ok(result) => Err(GenerationError::new(GenerationErrorKind::ConsistencyRejected {
                score: result.score,
                threshold,
                details: result.details.unwrap_or_default(),
            })
            .into()),
            Err(e) => {
                warn!(attempt = index, error = %e, "Consistency check unavailable, keeping clip unscored");
                Ok(None)
            }
        }
    }
}

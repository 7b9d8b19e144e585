//! Assembled engine: gateway, orchestrators and profile service.

use likeness_core::{
    ClipBatch, ClipRequest, ConsistencyResult, DataQualityReport, DataUri, IdentityEmbedding,
    RefineRequest, RefineResponse, SuitabilityReport, ValidateRequest,
};
use likeness_error::{ConfigError, LikenessResult, StorageError, StorageErrorKind};
use likeness_interface::{MediaFetcher, ModelGateway};
use likeness_models::{GeminiGateway, HttpMediaFetcher};
use likeness_pipeline::{
    ClipGenerator, ClipSettings, ConsistencyValidator, IdentityEmbedder, LikenessRefiner,
    VideoAnalyzer,
};
use likeness_rate_limit::{Feature, FeatureFlags, LikenessConfig};
use likeness_storage::{ProfileService, ProfileStore, ProfileStoreKind};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Every engine operation behind one handle.
///
/// The engine is stateless apart from the profile store, so a single instance
/// can serve concurrent requests.
pub struct LikenessEngine<G = GeminiGateway, F = HttpMediaFetcher> {
    config: LikenessConfig,
    analyzer: VideoAnalyzer<G>,
    identity: IdentityEmbedder<G>,
    clips: ClipGenerator<G, F>,
    refiner: LikenessRefiner<G>,
    validator: ConsistencyValidator<G>,
    profiles: ProfileService,
}

impl LikenessEngine {
    /// Engine backed by Gemini and the store the configuration selects.
    ///
    /// Gateway metrics are recorded when the `analytics` flag is on.
    ///
    /// # Errors
    ///
    /// Returns an error when the API key is missing or the store cannot be
    /// built.
    pub fn from_config(config: LikenessConfig) -> LikenessResult<Self> {
        let gateway = GeminiGateway::new(&config.gateway)?
            .with_metrics(config.features.is_enabled(Feature::Analytics));
        let fetcher = gateway.media_fetcher();
        let store = ProfileStoreKind::from_config(&config)?.build()?;
        Ok(Self::new(config, gateway, fetcher, store))
    }
}

impl<G, F> LikenessEngine<G, F>
where
    G: ModelGateway + Clone,
    F: MediaFetcher,
{
    /// Engine over explicit components.
    pub fn new(config: LikenessConfig, gateway: G, fetcher: F, store: Arc<dyn ProfileStore>) -> Self {
        Self {
            analyzer: VideoAnalyzer::new(gateway.clone()),
            identity: IdentityEmbedder::new(gateway.clone()),
            clips: ClipGenerator::new(gateway.clone(), fetcher, ClipSettings::from_config(&config)),
            refiner: LikenessRefiner::new(gateway.clone(), config.refinement.clone()),
            validator: ConsistencyValidator::new(gateway),
            profiles: ProfileService::new(store),
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &LikenessConfig {
        &self.config
    }

    /// Active feature flags.
    pub fn features(&self) -> &FeatureFlags {
        &self.config.features
    }

    /// Emotions offered for generation under the current flags.
    pub fn offered_emotions(&self) -> &'static [&'static str] {
        self.config.features.offered_emotions()
    }

    /// Profile operations.
    pub fn profiles(&self) -> &ProfileService {
        &self.profiles
    }

    /// Suitability report for uploaded footage.
    ///
    /// # Errors
    ///
    /// Propagates gateway and decoding failures.
    pub async fn analyze_footage(&self, video: &DataUri) -> LikenessResult<SuitabilityReport> {
        self.analyzer.analyze_suitability(video).await
    }

    /// Quality rubric for uploaded footage.
    ///
    /// # Errors
    ///
    /// Propagates gateway and decoding failures.
    pub async fn validate_quality(&self, video: &DataUri) -> LikenessResult<DataQualityReport> {
        self.analyzer.validate_quality(video).await
    }

    /// Identity embedding from reference frames.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the `identity_embedding` flag is off,
    /// otherwise see [`IdentityEmbedder::generate`].
    pub async fn generate_identity(&self, frames: &[DataUri]) -> LikenessResult<IdentityEmbedding> {
        if !self.config.features.is_enabled(Feature::IdentityEmbedding) {
            return Err(ConfigError::new(format!(
                "The {} feature is disabled (set features.identity_embedding)",
                Feature::IdentityEmbedding
            ))
            .into());
        }
        self.identity.generate(frames).await
    }

    /// Generate a batch of emotion clips.
    ///
    /// Emotions outside the offered taxonomy are generated anyway but logged.
    ///
    /// # Errors
    ///
    /// See [`ClipGenerator::generate_clips`].
    #[instrument(skip(self, request), fields(emotion = %request.target_emotion()))]
    pub async fn generate_clips(&self, request: &ClipRequest) -> LikenessResult<ClipBatch> {
        let emotion = request.target_emotion();
        if !self
            .offered_emotions()
            .iter()
            .any(|offered| offered.eq_ignore_ascii_case(emotion))
        {
            warn!("Emotion is not in the offered taxonomy");
        }
        let clips = self.clips.generate_clips(request).await?;
        Ok(ClipBatch { clips })
    }

    /// Generate clips and record them on a stored profile.
    ///
    /// # Errors
    ///
    /// Returns a request error for an invalid request (including a zero clip
    /// count), a storage error when the profile does not exist, otherwise see
    /// [`LikenessEngine::generate_clips`].
    #[instrument(skip(self, request), fields(profile = %profile_id))]
    pub async fn generate_for_profile(
        &self,
        profile_id: &str,
        request: &ClipRequest,
    ) -> LikenessResult<ClipBatch> {
        request.validate()?;
        if self.profiles.get_profile(profile_id).await?.is_none() {
            return Err(missing_profile(profile_id).into());
        }
        let batch = self.generate_clips(request).await?;
        let intensity = request.intensity().unwrap_or_default();
        self.profiles
            .record_clip_batch(profile_id, request.target_emotion(), intensity, &batch.clips)
            .await?
            .ok_or_else(|| missing_profile(profile_id))?;
        info!(clips = batch.clips.len(), "Recorded clips on profile");
        Ok(batch)
    }

    /// Generate an identity embedding and store it on a profile.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the profile does not exist, otherwise see
    /// [`LikenessEngine::generate_identity`].
    pub async fn identity_for_profile(
        &self,
        profile_id: &str,
        frames: &[DataUri],
    ) -> LikenessResult<IdentityEmbedding> {
        if self.profiles.get_profile(profile_id).await?.is_none() {
            return Err(missing_profile(profile_id).into());
        }
        let identity = self.generate_identity(frames).await?;
        let frame_uris = frames.iter().map(ToString::to_string).collect();
        self.profiles
            .update_identity_embedding(profile_id, identity.embedding.clone(), frame_uris)
            .await?;
        Ok(identity)
    }

    /// Edit a likeness image.
    ///
    /// # Errors
    ///
    /// See [`LikenessRefiner::refine`].
    pub async fn refine(&self, request: &RefineRequest) -> LikenessResult<RefineResponse> {
        self.refiner.refine_request(request).await
    }

    /// Score media against an identity.
    ///
    /// # Errors
    ///
    /// Only request validation errors are returned; scoring failures become
    /// a non-passing result.
    pub async fn validate(&self, request: &ValidateRequest) -> LikenessResult<ConsistencyResult> {
        self.validator.validate_request(request).await
    }
}

fn missing_profile(id: &str) -> StorageError {
    StorageError::new(StorageErrorKind::NotFound(id.to_string()))
}

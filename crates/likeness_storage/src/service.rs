//! Profile mutation rules on top of a [`ProfileStore`].

use crate::ProfileStore;
use chrono::Utc;
use likeness_core::{
    ActorProfile, ClipResult, EmotionClipData, EmotionIntensity, MotorTraits, VideoCategory,
};
use likeness_error::LikenessResult;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Profile operations used by the CLI and orchestration layer.
///
/// Operations on a missing profile return `Ok(None)` (or `false` for
/// deletion) rather than an error.
#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
}

impl std::fmt::Debug for ProfileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileService")
            .field("backend", &self.store.backend_name())
            .finish()
    }
}

impl ProfileService {
    /// Service over an injected store.
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Name of the backing store.
    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Create and persist an empty profile.
    #[instrument(skip(self))]
    pub async fn create_profile(&self, name: &str) -> LikenessResult<ActorProfile> {
        let profile = ActorProfile::new(name);
        self.store.put(&profile).await?;
        info!(id = %profile.id, "Created actor profile");
        Ok(profile)
    }

    /// Fetch a profile.
    pub async fn get_profile(&self, id: &str) -> LikenessResult<Option<ActorProfile>> {
        self.store.get(id).await
    }

    /// All profiles, oldest first.
    pub async fn list_profiles(&self) -> LikenessResult<Vec<ActorProfile>> {
        let mut profiles = self.store.list().await?;
        profiles.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(profiles)
    }

    /// Apply `update` to a stored profile and persist the result.
    ///
    /// `id` and `created_at` are restored after the closure runs and
    /// `updated_at` is refreshed.
    #[instrument(skip(self, update))]
    pub async fn update_profile<F>(&self, id: &str, update: F) -> LikenessResult<Option<ActorProfile>>
    where
        F: FnOnce(&mut ActorProfile) + Send,
    {
        let Some(current) = self.store.get(id).await? else {
            debug!("Profile not found");
            return Ok(None);
        };

        let mut updated = current.clone();
        update(&mut updated);
        updated.id = current.id;
        updated.created_at = current.created_at;
        updated.updated_at = Utc::now().max(current.updated_at);

        self.store.put(&updated).await?;
        Ok(Some(updated))
    }

    /// Remove a profile.
    #[instrument(skip(self))]
    pub async fn delete_profile(&self, id: &str) -> LikenessResult<bool> {
        self.store.delete(id).await
    }

    /// Append a training video to a category.
    pub async fn add_training_video(
        &self,
        id: &str,
        category: VideoCategory,
        uri: &str,
    ) -> LikenessResult<Option<ActorProfile>> {
        self.update_profile(id, |profile| profile.training_videos.push(category, uri))
            .await
    }

    /// Record clips for an emotion and recompute coverage.
    pub async fn update_emotion_coverage(
        &self,
        id: &str,
        emotion: &str,
        clip_data: EmotionClipData,
    ) -> LikenessResult<Option<ActorProfile>> {
        self.update_profile(id, |profile| profile.set_emotion_coverage(emotion, clip_data))
            .await
    }

    /// Replace the face identity and its reference frames.
    pub async fn update_identity_embedding(
        &self,
        id: &str,
        embedding: Vec<f32>,
        reference_frames: Vec<String>,
    ) -> LikenessResult<Option<ActorProfile>> {
        self.update_profile(id, |profile| profile.set_identity(embedding, reference_frames))
            .await
    }

    /// Replace the motor traits.
    pub async fn update_motor_traits(
        &self,
        id: &str,
        traits: MotorTraits,
    ) -> LikenessResult<Option<ActorProfile>> {
        self.update_profile(id, |profile| profile.motor_traits = Some(traits))
            .await
    }

    /// Fold a score into the running consistency average.
    pub async fn update_consistency_score(
        &self,
        id: &str,
        score: f64,
    ) -> LikenessResult<Option<ActorProfile>> {
        self.update_profile(id, |profile| profile.record_consistency_score(score))
            .await
    }

    /// Record a generated clip batch in one update.
    ///
    /// The clips become the emotion's coverage entry, with quality equal to
    /// the mean consistency score of the scored clips (`0.0` when none were
    /// scored), and every score is folded into the running average.
    #[instrument(skip(self, clips), fields(clips = clips.len()))]
    pub async fn record_clip_batch(
        &self,
        id: &str,
        emotion: &str,
        intensity: EmotionIntensity,
        clips: &[ClipResult],
    ) -> LikenessResult<Option<ActorProfile>> {
        let scores: Vec<f64> = clips.iter().filter_map(|c| c.consistency_score).collect();
        let quality = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };
        let clip_data = EmotionClipData {
            clips: clips.iter().map(|c| c.media_uri.to_string()).collect(),
            quality,
            intensity,
            generated_at: Utc::now(),
        };

        self.update_profile(id, |profile| {
            profile.set_emotion_coverage(emotion, clip_data);
            for score in scores {
                profile.record_consistency_score(score);
            }
        })
        .await
    }
}

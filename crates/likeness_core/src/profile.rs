//! Actor profile aggregate.

use crate::{EmotionIntensity, coverage_percent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category a training video is filed under.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VideoCategory {
    /// Close-up facial footage
    Facial,
    /// Full-body footage
    Body,
    /// Movement footage
    Motion,
}

/// Training footage grouped by category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrainingVideos {
    /// Facial videos
    #[serde(default)]
    pub facial: Vec<String>,
    /// Body videos
    #[serde(default)]
    pub body: Vec<String>,
    /// Motion videos
    #[serde(default)]
    pub motion: Vec<String>,
}

impl TrainingVideos {
    /// Videos filed under `category`.
    pub fn get(&self, category: VideoCategory) -> &[String] {
        match category {
            VideoCategory::Facial => &self.facial,
            VideoCategory::Body => &self.body,
            VideoCategory::Motion => &self.motion,
        }
    }

    /// Append a video to `category`.
    pub fn push(&mut self, category: VideoCategory, uri: impl Into<String>) {
        let list = match category {
            VideoCategory::Facial => &mut self.facial,
            VideoCategory::Body => &mut self.body,
            VideoCategory::Motion => &mut self.motion,
        };
        list.push(uri.into());
    }

    /// Total number of videos across categories.
    pub fn len(&self) -> usize {
        self.facial.len() + self.body.len() + self.motion.len()
    }

    /// True when no videos are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Clips recorded for one emotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionClipData {
    /// Clip URIs
    pub clips: Vec<String>,
    /// Quality score in `[0, 1]`
    pub quality: f64,
    /// Intensity the clips were generated at
    pub intensity: EmotionIntensity,
    /// When the clips were generated
    pub generated_at: DateTime<Utc>,
}

/// Movement characteristics used for full-body modeling.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MotorTraits {
    /// Gait description
    pub gait: String,
    /// Common gestures
    #[serde(default)]
    pub gestures: Vec<String>,
    /// Typical posture
    pub posture: String,
}

/// Long-lived record of an actor's identity, footage and generation history.
///
/// The mutation helpers keep the derived fields (`emotion_coverage_percent`,
/// `consistency_score`) consistent with the data they summarize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorProfile {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Creation time, never changed by updates
    pub created_at: DateTime<Utc>,
    /// Time of the last update
    pub updated_at: DateTime<Utc>,
    /// Face identity embedding
    #[serde(default)]
    pub face_embedding: Option<Vec<f32>>,
    /// Body identity embedding
    #[serde(default)]
    pub body_embedding: Option<Vec<f32>>,
    /// Canonical reference frames
    #[serde(default)]
    pub reference_frames: Vec<String>,
    /// Uploaded training footage
    #[serde(default)]
    pub training_videos: TrainingVideos,
    /// Recorded clips per emotion
    #[serde(default)]
    pub emotion_coverage: BTreeMap<String, EmotionClipData>,
    /// Movement characteristics
    #[serde(default)]
    pub motor_traits: Option<MotorTraits>,
    /// Running average of identity consistency scores
    #[serde(default)]
    pub consistency_score: f64,
    /// Share of the tracked emotion taxonomy covered, `0..=100`
    #[serde(default)]
    pub emotion_coverage_percent: f64,
    /// Overall training data quality
    #[serde(default)]
    pub data_quality_score: f64,
    /// Full-body modeling enabled for this actor
    #[serde(default)]
    pub enable_full_body: bool,
    /// Multimodal analysis enabled for this actor
    #[serde(default)]
    pub enable_multi_modal: bool,
}

impl ActorProfile {
    /// Fresh profile with a generated id and empty data.
    ///
    /// # Examples
    ///
    /// ```
    /// use likeness_core::ActorProfile;
    ///
    /// let profile = ActorProfile::new("Ada");
    /// assert!(profile.id.starts_with("profile_"));
    /// assert_eq!(profile.emotion_coverage_percent, 0.0);
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Self {
            id: format!("profile_{}_{}", now.timestamp_millis(), &suffix[..9]),
            name: name.into(),
            created_at: now,
            updated_at: now,
            face_embedding: None,
            body_embedding: None,
            reference_frames: Vec::new(),
            training_videos: TrainingVideos::default(),
            emotion_coverage: BTreeMap::new(),
            motor_traits: None,
            consistency_score: 0.0,
            emotion_coverage_percent: 0.0,
            data_quality_score: 0.0,
            enable_full_body: false,
            enable_multi_modal: false,
        }
    }

    /// Store clips for `emotion`, replacing earlier ones, and recompute coverage.
    pub fn set_emotion_coverage(&mut self, emotion: impl Into<String>, data: EmotionClipData) {
        self.emotion_coverage.insert(emotion.into(), data);
        self.emotion_coverage_percent = coverage_percent(self.emotion_coverage.len());
    }

    /// Fold a new score into the running consistency average.
    ///
    /// ```
    /// use likeness_core::ActorProfile;
    ///
    /// let mut profile = ActorProfile::new("Ada");
    /// profile.record_consistency_score(0.9);
    /// profile.record_consistency_score(0.7);
    /// assert!((profile.consistency_score - 0.8).abs() < 1e-9);
    /// ```
    pub fn record_consistency_score(&mut self, score: f64) {
        self.consistency_score = if self.consistency_score == 0.0 {
            score
        } else {
            (self.consistency_score + score) / 2.0
        };
    }

    /// Replace the face identity and its reference frames.
    pub fn set_identity(&mut self, embedding: Vec<f32>, reference_frames: Vec<String>) {
        self.face_embedding = Some(embedding);
        self.reference_frames = reference_frames;
    }

    /// Emotions with recorded clips.
    pub fn covered_emotions(&self) -> impl Iterator<Item = &str> {
        self.emotion_coverage.keys().map(String::as_str)
    }

    /// Emotions from `offered` that have no clips yet.
    pub fn missing_emotions<'a>(&self, offered: &[&'a str]) -> Vec<&'a str> {
        offered
            .iter()
            .copied()
            .filter(|emotion| !self.emotion_coverage.contains_key(*emotion))
            .collect()
    }
}

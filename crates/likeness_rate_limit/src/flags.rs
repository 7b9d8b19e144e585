//! Feature flags gating optional capabilities.

use likeness_core::{BASE_EMOTIONS, EXPANDED_EMOTIONS};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Named optional capability.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum Feature {
    /// Multimodal (audio and video) analysis
    Multimodal,
    /// Full-body modeling
    FullBody,
    /// Identity embedding generation
    IdentityEmbedding,
    /// Offer the 24-emotion taxonomy
    ExpandedEmotions,
    /// Persist profiles in the cloud store
    CloudStorage,
    /// Record gateway metrics
    Analytics,
}

impl Feature {
    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Feature::Multimodal => "Multi-Modal Capture",
            Feature::FullBody => "Full-Body Modeling",
            Feature::IdentityEmbedding => "Identity Embedding",
            Feature::ExpandedEmotions => "Expanded Emotions",
            Feature::CloudStorage => "Cloud Storage",
            Feature::Analytics => "Analytics",
        }
    }

    /// One-line description of what the flag unlocks.
    pub fn description(&self) -> &'static str {
        match self {
            Feature::Multimodal => "Upload multiple videos for comprehensive data capture",
            Feature::FullBody => "Capture and generate full-body clips with motor traits",
            Feature::IdentityEmbedding => "Advanced facial consistency using identity embeddings",
            Feature::ExpandedEmotions => "24 emotions with intensity control",
            Feature::CloudStorage => "Cloud storage for actor profiles",
            Feature::Analytics => "Gateway request, latency and error metrics",
        }
    }
}

/// Feature flag set. Every flag defaults to off.
///
/// # Examples
///
/// ```
/// use likeness_rate_limit::{Feature, FeatureFlags};
///
/// let flags = FeatureFlags {
///     expanded_emotions: true,
///     ..FeatureFlags::default()
/// };
/// assert!(flags.is_enabled(Feature::ExpandedEmotions));
/// assert_eq!(flags.offered_emotions().len(), 24);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// Multimodal (audio and video) analysis
    pub multimodal: bool,
    /// Full-body modeling
    pub full_body: bool,
    /// Identity embedding generation
    pub identity_embedding: bool,
    /// Offer the 24-emotion taxonomy
    pub expanded_emotions: bool,
    /// Persist profiles in the cloud store
    pub cloud_storage: bool,
    /// Record gateway metrics
    pub analytics: bool,
}

impl FeatureFlags {
    /// Whether `feature` is on.
    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::Multimodal => self.multimodal,
            Feature::FullBody => self.full_body,
            Feature::IdentityEmbedding => self.identity_embedding,
            Feature::ExpandedEmotions => self.expanded_emotions,
            Feature::CloudStorage => self.cloud_storage,
            Feature::Analytics => self.analytics,
        }
    }

    /// Every feature with its current state, in declaration order.
    pub fn status(&self) -> Vec<(Feature, bool)> {
        Feature::iter().map(|f| (f, self.is_enabled(f))).collect()
    }

    /// Emotions offered for generation.
    pub fn offered_emotions(&self) -> &'static [&'static str] {
        if self.expanded_emotions {
            &EXPANDED_EMOTIONS
        } else {
            &BASE_EMOTIONS
        }
    }
}

//! Footage analysis and identity outputs.

use serde::{Deserialize, Serialize};

/// Text-proxy identity embedding derived from a canonical frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityEmbedding {
    /// Embedding of the face description
    pub embedding: Vec<f32>,
    /// Description the embedding was computed from
    pub face_description: String,
    /// Consistency across frames; currently always `1.0`
    pub consistency_score: f64,
    /// Index of the canonical frame in the input
    pub canonical_frame_index: usize,
}

/// Free-text suitability analysis of uploaded footage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuitabilityReport {
    /// Analyst report
    pub suitability_report: String,
}

/// Resolution sub-score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResolutionScore {
    /// Estimated width in pixels
    pub width: u32,
    /// Estimated height in pixels
    pub height: u32,
    /// Score in `[0, 1]`
    pub score: f64,
}

/// Lighting sub-score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LightingScore {
    /// Score in `[0, 1]`
    pub score: f64,
    /// Detected problems
    #[serde(default)]
    pub issues: Vec<String>,
}

/// Face visibility sub-score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FaceVisibilityScore {
    /// Score in `[0, 1]`
    pub score: f64,
    /// Share of frames with a visible face, `0..=100`
    pub percentage: f64,
}

/// Motion blur sub-score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionBlurScore {
    /// Score in `[0, 1]`
    pub score: f64,
    /// Whether significant blur was found
    pub detected: bool,
}

/// Diversity sub-score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DiversityScore {
    /// Score in `[0, 1]`
    pub score: f64,
    /// Distinct camera angles
    pub angles: u32,
    /// Distinct expressions
    pub expressions: u32,
}

/// Structured quality assessment of training footage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityReport {
    /// Weighted overall score in `[0, 1]`
    pub overall_score: f64,
    /// Resolution assessment
    pub resolution: ResolutionScore,
    /// Lighting assessment
    pub lighting: LightingScore,
    /// Face visibility assessment
    pub face_visibility: FaceVisibilityScore,
    /// Motion blur assessment
    pub motion_blur: MotionBlurScore,
    /// Angle and expression diversity
    pub diversity: DiversityScore,
    /// Suggested improvements
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl DataQualityReport {
    /// Clamp every score into its documented range.
    pub fn clamped(mut self) -> Self {
        let unit = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        self.overall_score = unit(self.overall_score);
        self.resolution.score = unit(self.resolution.score);
        self.lighting.score = unit(self.lighting.score);
        self.face_visibility.score = unit(self.face_visibility.score);
        self.face_visibility.percentage = if self.face_visibility.percentage.is_nan() {
            0.0
        } else {
            self.face_visibility.percentage.clamp(0.0, 100.0)
        };
        self.motion_blur.score = unit(self.motion_blur.score);
        self.diversity.score = unit(self.diversity.score);
        self
    }
}

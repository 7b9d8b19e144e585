//! Emotion taxonomy and intensity levels.

use serde::{Deserialize, Serialize};

/// Emotions offered for generation by default.
pub const BASE_EMOTIONS: [&str; 9] = [
    "Happy",
    "Sad",
    "Angry",
    "Surprised",
    "Fearful",
    "Disgusted",
    "Ecstatic",
    "Weary",
    "Neutral",
];

/// Full taxonomy, offered when the `expanded_emotions` feature is on.
pub const EXPANDED_EMOTIONS: [&str; 24] = [
    "Happy",
    "Sad",
    "Angry",
    "Surprised",
    "Fearful",
    "Disgusted",
    "Ecstatic",
    "Weary",
    "Neutral",
    "Contempt",
    "Confused",
    "Anxious",
    "Proud",
    "Embarrassed",
    "Bored",
    "Determined",
    "Hopeful",
    "Jealous",
    "Guilty",
    "Relieved",
    "Amused",
    "Nostalgic",
    "Skeptical",
    "Tender",
];

/// Denominator for emotion coverage, independent of which list is offered.
pub const TOTAL_TRACKED_EMOTIONS: usize = 24;

/// Percentage of the tracked taxonomy covered by `covered` distinct emotions.
///
/// Never exceeds `100.0`.
///
/// # Examples
///
/// ```
/// use likeness_core::coverage_percent;
///
/// assert_eq!(coverage_percent(6), 25.0);
/// assert_eq!(coverage_percent(30), 100.0);
/// ```
pub fn coverage_percent(covered: usize) -> f64 {
    let percent = covered as f64 / TOTAL_TRACKED_EMOTIONS as f64 * 100.0;
    percent.min(100.0)
}

/// How strongly an emotion is expressed in a generated clip.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EmotionIntensity {
    /// Understated expression
    Subtle,
    /// Natural expression
    #[default]
    Moderate,
    /// Exaggerated expression
    Intense,
}

//! Prompt templates and response schemas.

use likeness_core::EmotionIntensity;
use serde_json::{Value, json};

/// Video generation prompt for one clip.
///
/// # Examples
///
/// ```
/// use likeness_core::EmotionIntensity;
/// use likeness_pipeline::prompts::clip_prompt;
///
/// let prompt = clip_prompt("Happy", Some(EmotionIntensity::Subtle), false);
/// assert!(prompt.contains("feeling Happy at subtle intensity."));
/// assert!(!prompt.contains("Maintain exact facial structure"));
/// ```
pub fn clip_prompt(emotion: &str, intensity: Option<EmotionIntensity>, preserve_identity: bool) -> String {
    let intensity_text = intensity
        .map(|i| format!(" at {} intensity", i))
        .unwrap_or_default();
    let identity_text = if preserve_identity {
        " Maintain exact facial structure, skin tone, and distinctive features of this specific person."
    } else {
        ""
    };
    format!(
        "Animate this specific person in the image. Create a short video clip where their facial \
         expression changes to show that they are feeling {emotion}{intensity_text}.{identity_text} \
         Focus on authentic {emotion} expression while preserving their unique likeness."
    )
}

/// Prompt asking for the facial features visible in generated media.
pub fn content_description_prompt(identity_description: Option<&str>) -> String {
    let mut prompt = String::from(
        "Analyze this image/video and provide a detailed description of the person's facial \
         features. Focus on the same aspects as identity descriptions: face shape, eyes, nose, \
         mouth, skin tone, hair, and distinctive features.",
    );
    if let Some(reference) = identity_description.filter(|d| !d.trim().is_empty()) {
        prompt.push_str("\n\nUse the same vocabulary as this reference description: ");
        prompt.push_str(reference);
    }
    prompt
}

/// Prompt asking for an objective description of a reference face.
pub const FACE_DESCRIPTION_PROMPT: &str = "Analyze this facial photograph and provide a detailed, \
objective description of the person's distinctive facial features. Focus on:
- Face shape and structure
- Eye shape, color, and spacing
- Nose shape and size
- Mouth and lip characteristics
- Skin tone and texture
- Hair color and style
- Any distinctive features (freckles, moles, etc.)
- Overall facial proportions

Be precise and detailed. This description will be used for identity consistency.";

/// Analyst prompt for footage suitability.
pub const SUITABILITY_PROMPT: &str = "You are an expert AI model analyst. Your task is to analyze \
the provided video data and generate a detailed report on its suitability for training a \
high-fidelity actor likeness model. Identify potential gaps in emotional range or body posture \
representation.";

/// Rubric prompt for footage quality.
pub const QUALITY_PROMPT: &str = "You are an expert video quality analyst for AI training data. \
Analyze the provided video and generate a comprehensive quality report.

Evaluate the following aspects:

1. Resolution: Assess video resolution. Score 1.0 for 1080p+, 0.7 for 720p, 0.4 for 480p, 0.0 for lower.

2. Lighting: Evaluate lighting quality. Score 1.0 for consistent, well-lit footage. Deduct for harsh \
shadows, overexposure, underexposure, or inconsistent lighting. List specific issues.

3. Face Visibility: Determine what percentage of frames show a clearly visible face. Score based on \
visibility percentage and clarity.

4. Motion Blur: Detect if motion blur is present. Score 1.0 if no blur, 0.5 if minor blur, 0.0 if \
significant blur.

5. Diversity: Assess variety in camera angles and facial expressions. Score based on how many \
different angles (frontal, profile, 3/4, etc.) and expressions are captured.

6. Recommendations: Provide 3-5 specific, actionable recommendations to improve data quality.

Calculate an overall score as the weighted average:
- Resolution: 20%
- Lighting: 25%
- Face Visibility: 30%
- Motion Blur: 10%
- Diversity: 15%";

/// Schema for `{ "description": string }`.
pub fn description_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "description": {
                "type": "STRING",
                "description": "Detailed description of facial features"
            }
        },
        "required": ["description"]
    })
}

/// Schema for `{ "suitabilityReport": string }`.
pub fn suitability_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "suitabilityReport": {
                "type": "STRING",
                "description": "Suitability of the footage for likeness training, including gaps in emotional range or body posture"
            }
        },
        "required": ["suitabilityReport"]
    })
}

/// Schema for the data quality report.
pub fn quality_schema() -> Value {
    let score = json!({"type": "NUMBER", "minimum": 0, "maximum": 1});
    json!({
        "type": "OBJECT",
        "properties": {
            "overallScore": score,
            "resolution": {
                "type": "OBJECT",
                "properties": {
                    "width": {"type": "INTEGER"},
                    "height": {"type": "INTEGER"},
                    "score": score
                },
                "required": ["width", "height", "score"]
            },
            "lighting": {
                "type": "OBJECT",
                "properties": {
                    "score": score,
                    "issues": {"type": "ARRAY", "items": {"type": "STRING"}}
                },
                "required": ["score", "issues"]
            },
            "faceVisibility": {
                "type": "OBJECT",
                "properties": {
                    "score": score,
                    "percentage": {"type": "NUMBER", "minimum": 0, "maximum": 100}
                },
                "required": ["score", "percentage"]
            },
            "motionBlur": {
                "type": "OBJECT",
                "properties": {
                    "score": score,
                    "detected": {"type": "BOOLEAN"}
                },
                "required": ["score", "detected"]
            },
            "diversity": {
                "type": "OBJECT",
                "properties": {
                    "score": score,
                    "angles": {"type": "INTEGER"},
                    "expressions": {"type": "INTEGER"}
                },
                "required": ["score", "angles", "expressions"]
            },
            "recommendations": {"type": "ARRAY", "items": {"type": "STRING"}}
        },
        "required": [
            "overallScore", "resolution", "lighting", "faceVisibility",
            "motionBlur", "diversity", "recommendations"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_prompt_with_identity_and_intensity() {
        let prompt = clip_prompt("Angry", Some(EmotionIntensity::Intense), true);
        assert_eq!(
            prompt,
            "Animate this specific person in the image. Create a short video clip where their \
             facial expression changes to show that they are feeling Angry at intense intensity. \
             Maintain exact facial structure, skin tone, and distinctive features of this specific \
             person. Focus on authentic Angry expression while preserving their unique likeness."
        );
    }

    #[test]
    fn clip_prompt_without_options() {
        let prompt = clip_prompt("Sad", None, false);
        assert!(prompt.contains("feeling Sad. Focus on authentic Sad expression"));
    }

    #[test]
    fn reference_description_is_appended_when_present() {
        assert!(content_description_prompt(Some("oval face")).ends_with("oval face"));
        assert!(!content_description_prompt(Some("  ")).contains("reference"));
    }
}

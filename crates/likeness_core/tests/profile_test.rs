use chrono::Utc;
use likeness_core::{
    ActorProfile, BASE_EMOTIONS, EXPANDED_EMOTIONS, EmotionClipData, EmotionIntensity,
    TOTAL_TRACKED_EMOTIONS, VideoCategory, coverage_percent,
};

fn clip_data(quality: f64) -> EmotionClipData {
    EmotionClipData {
        clips: vec!["data:video/mp4;base64,AAAA".to_string()],
        quality,
        intensity: EmotionIntensity::Moderate,
        generated_at: Utc::now(),
    }
}

#[test]
fn coverage_grows_with_distinct_emotions() {
    let mut profile = ActorProfile::new("Ada");
    let mut last = profile.emotion_coverage_percent;
    for emotion in &EXPANDED_EMOTIONS[..6] {
        profile.set_emotion_coverage(*emotion, clip_data(0.9));
        assert!(profile.emotion_coverage_percent >= last);
        last = profile.emotion_coverage_percent;
    }
    assert_eq!(profile.emotion_coverage_percent, 25.0);
}

#[test]
fn recording_the_same_emotion_twice_does_not_inflate_coverage() {
    let mut profile = ActorProfile::new("Ada");
    profile.set_emotion_coverage("Happy", clip_data(0.5));
    profile.set_emotion_coverage("Happy", clip_data(0.8));
    assert_eq!(profile.emotion_coverage.len(), 1);
    assert!((profile.emotion_coverage_percent - 100.0 / 24.0).abs() < 1e-9);
    assert_eq!(profile.emotion_coverage["Happy"].quality, 0.8);
}

#[test]
fn coverage_never_exceeds_one_hundred() {
    let mut profile = ActorProfile::new("Ada");
    for i in 0..30 {
        profile.set_emotion_coverage(format!("Emotion{i}"), clip_data(0.5));
    }
    assert_eq!(profile.emotion_coverage_percent, 100.0);
    assert_eq!(coverage_percent(TOTAL_TRACKED_EMOTIONS), 100.0);
}

#[test]
fn running_average_starts_from_first_score() {
    let mut profile = ActorProfile::new("Ada");
    profile.record_consistency_score(0.9);
    assert!((profile.consistency_score - 0.9).abs() < 1e-9);
    profile.record_consistency_score(0.7);
    assert!((profile.consistency_score - 0.8).abs() < 1e-9);
}

#[test]
fn training_videos_append_per_category() {
    let mut profile = ActorProfile::new("Ada");
    profile.training_videos.push(VideoCategory::Facial, "a");
    profile.training_videos.push(VideoCategory::Facial, "b");
    profile.training_videos.push(VideoCategory::Motion, "c");
    assert_eq!(profile.training_videos.get(VideoCategory::Facial), ["a", "b"]);
    assert!(profile.training_videos.get(VideoCategory::Body).is_empty());
    assert_eq!(profile.training_videos.len(), 3);
}

#[test]
fn missing_emotions_skips_covered_ones() {
    let mut profile = ActorProfile::new("Ada");
    profile.set_emotion_coverage("Happy", clip_data(0.9));
    profile.set_emotion_coverage("Sad", clip_data(0.9));
    let missing = profile.missing_emotions(&BASE_EMOTIONS);
    assert_eq!(missing.len(), 7);
    assert!(!missing.contains(&"Happy"));
}

#[test]
fn profile_serializes_in_camel_case() -> anyhow::Result<()> {
    let profile = ActorProfile::new("Ada");
    let json = serde_json::to_value(&profile)?;
    assert!(json.get("emotionCoveragePercent").is_some());
    assert!(json.get("trainingVideos").is_some());
    let back: ActorProfile = serde_json::from_value(json)?;
    assert_eq!(back, profile);
    Ok(())
}

#[test]
fn video_category_parses_case_insensitively() -> anyhow::Result<()> {
    let category: VideoCategory = "Facial".parse()?;
    assert_eq!(category, VideoCategory::Facial);
    assert_eq!(VideoCategory::Body.to_string(), "body");
    Ok(())
}

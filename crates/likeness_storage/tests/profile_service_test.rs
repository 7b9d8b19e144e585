//! Tests for profile service rules over the in-memory store.

use chrono::Utc;
use likeness_core::{
    ClipResult, DataUri, EXPANDED_EMOTIONS, EmotionClipData, EmotionIntensity, MotorTraits,
    VideoCategory,
};
use likeness_rate_limit::LikenessConfig;
use likeness_storage::{InMemoryProfileStore, ProfileService, ProfileStoreKind};
use std::sync::Arc;

fn service() -> ProfileService {
    ProfileService::new(Arc::new(InMemoryProfileStore::new()))
}

fn clip_data() -> EmotionClipData {
    EmotionClipData {
        clips: vec!["data:video/mp4;base64,AAAA".to_string()],
        quality: 0.9,
        intensity: EmotionIntensity::Moderate,
        generated_at: Utc::now(),
    }
}

#[tokio::test]
async fn create_then_get_round_trips() -> anyhow::Result<()> {
    let service = service();
    let created = service.create_profile("Ada").await?;
    let fetched = service.get_profile(&created.id).await?;
    assert_eq!(fetched, Some(created));
    assert_eq!(service.list_profiles().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn missing_profiles_are_not_errors() -> anyhow::Result<()> {
    let service = service();
    assert!(service.get_profile("nope").await?.is_none());
    assert!(service.update_consistency_score("nope", 0.5).await?.is_none());
    assert!(!service.delete_profile("nope").await?);
    Ok(())
}

#[tokio::test]
async fn update_cannot_change_identity_fields() -> anyhow::Result<()> {
    let service = service();
    let created = service.create_profile("Ada").await?;
    let updated = service
        .update_profile(&created.id, |profile| {
            profile.id = "hijacked".to_string();
            profile.created_at = Utc::now() + chrono::Duration::days(1);
            profile.name = "Grace".to_string();
        })
        .await?
        .ok_or_else(|| anyhow::anyhow!("profile vanished"))?;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(updated.name, "Grace");
    assert!(service.get_profile("hijacked").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn consistency_score_is_a_running_average() -> anyhow::Result<()> {
    let service = service();
    let id = service.create_profile("Ada").await?.id;
    let first = service.update_consistency_score(&id, 0.9).await?;
    assert_eq!(first.map(|p| p.consistency_score), Some(0.9));
    let second = service
        .update_consistency_score(&id, 0.7)
        .await?
        .ok_or_else(|| anyhow::anyhow!("profile vanished"))?;
    assert!((second.consistency_score - 0.8).abs() < 1e-9);
    Ok(())
}

#[tokio::test]
async fn six_emotions_cover_a_quarter() -> anyhow::Result<()> {
    let service = service();
    let id = service.create_profile("Ada").await?.id;
    let mut last = 0.0;
    for emotion in &EXPANDED_EMOTIONS[..6] {
        let profile = service
            .update_emotion_coverage(&id, emotion, clip_data())
            .await?
            .ok_or_else(|| anyhow::anyhow!("profile vanished"))?;
        assert!(profile.emotion_coverage_percent >= last);
        last = profile.emotion_coverage_percent;
    }
    assert_eq!(last, 25.0);
    Ok(())
}

#[tokio::test]
async fn training_videos_append() -> anyhow::Result<()> {
    let service = service();
    let id = service.create_profile("Ada").await?.id;
    service
        .add_training_video(&id, VideoCategory::Facial, "video-1")
        .await?;
    let profile = service
        .add_training_video(&id, VideoCategory::Facial, "video-2")
        .await?
        .ok_or_else(|| anyhow::anyhow!("profile vanished"))?;
    assert_eq!(profile.training_videos.facial, vec!["video-1", "video-2"]);
    Ok(())
}

#[tokio::test]
async fn identity_and_motor_traits_are_replaced() -> anyhow::Result<()> {
    let service = service();
    let id = service.create_profile("Ada").await?.id;
    service
        .update_identity_embedding(&id, vec![0.1, 0.2], vec!["frame-0".to_string()])
        .await?;
    let traits = MotorTraits {
        gait: "long strides".to_string(),
        gestures: vec!["hand wave".to_string()],
        posture: "upright".to_string(),
    };
    let profile = service
        .update_motor_traits(&id, traits.clone())
        .await?
        .ok_or_else(|| anyhow::anyhow!("profile vanished"))?;
    assert_eq!(profile.face_embedding, Some(vec![0.1, 0.2]));
    assert_eq!(profile.reference_frames, vec!["frame-0"]);
    assert_eq!(profile.motor_traits, Some(traits));
    Ok(())
}

#[tokio::test]
async fn clip_batch_updates_coverage_and_average() -> anyhow::Result<()> {
    let service = service();
    let id = service.create_profile("Ada").await?.id;
    let clips = vec![
        ClipResult {
            media_uri: DataUri::new("video/mp4", vec![1]),
            consistency_score: Some(0.9),
        },
        ClipResult {
            media_uri: DataUri::new("video/mp4", vec![2]),
            consistency_score: Some(0.7),
        },
        ClipResult {
            media_uri: DataUri::new("video/mp4", vec![3]),
            consistency_score: None,
        },
    ];
    let profile = service
        .record_clip_batch(&id, "Happy", EmotionIntensity::Subtle, &clips)
        .await?
        .ok_or_else(|| anyhow::anyhow!("profile vanished"))?;
    let entry = &profile.emotion_coverage["Happy"];
    assert_eq!(entry.clips.len(), 3);
    assert!((entry.quality - 0.8).abs() < 1e-9);
    assert_eq!(entry.intensity, EmotionIntensity::Subtle);
    assert!((profile.consistency_score - 0.8).abs() < 1e-9);
    assert!((profile.emotion_coverage_percent - 100.0 / 24.0).abs() < 1e-9);
    Ok(())
}

#[tokio::test]
async fn delete_removes_profile() -> anyhow::Result<()> {
    let service = service();
    let id = service.create_profile("Ada").await?.id;
    assert!(service.delete_profile(&id).await?);
    assert!(service.get_profile(&id).await?.is_none());
    Ok(())
}

#[test]
fn memory_backend_is_the_default() -> anyhow::Result<()> {
    let kind = ProfileStoreKind::from_config(&LikenessConfig::default())?;
    assert_eq!(kind, ProfileStoreKind::Memory);
    assert_eq!(kind.build()?.backend_name(), "memory");
    Ok(())
}

#[test]
fn cloud_flag_selects_firebase() -> anyhow::Result<()> {
    let mut config = LikenessConfig::default();
    config.features.cloud_storage = true;
    assert!(ProfileStoreKind::from_config(&config).is_err());

    config.storage.firebase_url = Some("https://demo.firebaseio.com".to_string());
    let store = ProfileStoreKind::from_config(&config)?.build()?;
    assert_eq!(store.backend_name(), "firebase");
    Ok(())
}

// Engine assembly tests over a stub provider.

use async_trait::async_trait;
use likeness::{
    ClipRequest, Completion, CompletionRequest, DataUri, FeatureFlags, FetchedMedia,
    InMemoryProfileStore, LikenessConfig, LikenessEngine, LikenessErrorKind, LikenessResult,
    MediaFetcher, MediaResult, ModelGateway, Operation, StorageErrorKind, VideoGenerationRequest,
    coverage_percent,
};
use std::sync::Arc;

/// Provider that finishes every job immediately and describes every face the same way.
#[derive(Clone)]
struct StubGateway;

#[async_trait]
impl ModelGateway for StubGateway {
    async fn complete(&self, _req: &CompletionRequest) -> LikenessResult<Completion> {
        Ok(Completion::from_text(r#"{"description": "angular face"}"#))
    }

    async fn embed(&self, _text: &str) -> LikenessResult<Vec<f32>> {
        Ok(vec![1.0, 0.0])
    }

    async fn generate_async(
        &self,
        _req: &VideoGenerationRequest,
    ) -> LikenessResult<Option<Operation>> {
        Ok(Some(Operation::pending("operations/stub")))
    }

    async fn poll_operation(&self, operation: &Operation) -> LikenessResult<Operation> {
        Ok(Operation::succeeded(
            operation.id.clone(),
            MediaResult {
                media_uri: "https://media/stub".to_string(),
                content_type: "video/mp4".to_string(),
            },
        ))
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }
}

struct StubFetcher;

#[async_trait]
impl MediaFetcher for StubFetcher {
    async fn fetch(&self, _uri: &str) -> LikenessResult<FetchedMedia> {
        Ok(FetchedMedia {
            bytes: vec![0, 1, 2],
            content_type: None,
        })
    }
}

fn engine(features: FeatureFlags) -> LikenessEngine<StubGateway, StubFetcher> {
    let mut config = LikenessConfig::default();
    config.features = features;
    LikenessEngine::new(
        config,
        StubGateway,
        StubFetcher,
        Arc::new(InMemoryProfileStore::new()),
    )
}

fn frame() -> DataUri {
    DataUri::new("image/png", vec![9, 9])
}

#[tokio::test(start_paused = true)]
async fn test_generated_clips_are_recorded_on_profile() -> anyhow::Result<()> {
    let engine = engine(FeatureFlags::default());
    let profile = engine.profiles().create_profile("Ada").await?;
    let request = ClipRequest::builder()
        .source_image(frame())
        .target_emotion("Happy")
        .clip_count(2u32)
        .identity_embedding(vec![1.0, 0.0])
        .validate_consistency(true)
        .build()?;

    let batch = engine.generate_for_profile(&profile.id, &request).await?;

    assert_eq!(batch.clips.len(), 2);
    assert!(batch.clips.iter().all(|c| c.consistency_score == Some(1.0)));
    assert_eq!(batch.clips[0].media_uri.mime_type(), "video/mp4");

    let stored = engine
        .profiles()
        .get_profile(&profile.id)
        .await?
        .expect("profile should exist");
    assert_eq!(stored.emotion_coverage["Happy"].clips.len(), 2);
    assert_eq!(stored.emotion_coverage_percent, coverage_percent(1));
    assert_eq!(stored.consistency_score, 1.0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_generation_for_unknown_profile_fails() {
    let engine = engine(FeatureFlags::default());
    let request = ClipRequest::builder()
        .source_image(frame())
        .target_emotion("Sad")
        .build()
        .unwrap();

    let err = engine
        .generate_for_profile("profile_missing", &request)
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        LikenessErrorKind::Storage(e) if e.kind == StorageErrorKind::NotFound("profile_missing".to_string())
    ));
}

#[tokio::test(start_paused = true)]
async fn test_zero_clip_request_leaves_profile_untouched() -> anyhow::Result<()> {
    let engine = engine(FeatureFlags::default());
    let profile = engine.profiles().create_profile("Lin").await?;
    let request = ClipRequest::builder()
        .source_image(frame())
        .target_emotion("Happy")
        .clip_count(0u32)
        .build()?;

    let err = engine
        .generate_for_profile(&profile.id, &request)
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), LikenessErrorKind::Request(_)));

    let stored = engine
        .profiles()
        .get_profile(&profile.id)
        .await?
        .expect("profile should exist");
    assert!(stored.emotion_coverage.is_empty());
    assert_eq!(stored.emotion_coverage_percent, 0.0);
    Ok(())
}

#[tokio::test]
async fn test_identity_requires_feature_flag() -> anyhow::Result<()> {
    let disabled = engine(FeatureFlags::default());
    let err = disabled.generate_identity(&[frame()]).await.unwrap_err();
    assert!(matches!(err.kind(), LikenessErrorKind::Config(_)));

    let enabled = engine(FeatureFlags {
        identity_embedding: true,
        ..FeatureFlags::default()
    });
    let profile = enabled.profiles().create_profile("Grace").await?;
    let identity = enabled.identity_for_profile(&profile.id, &[frame()]).await?;

    assert_eq!(identity.face_description, "angular face");
    let stored = enabled
        .profiles()
        .get_profile(&profile.id)
        .await?
        .expect("profile should exist");
    assert_eq!(stored.face_embedding, Some(vec![1.0, 0.0]));
    assert_eq!(stored.reference_frames, vec![frame().to_string()]);
    Ok(())
}

#[test]
fn test_offered_emotions_follow_flag() {
    assert_eq!(engine(FeatureFlags::default()).offered_emotions().len(), 9);
    let expanded = engine(FeatureFlags {
        expanded_emotions: true,
        ..FeatureFlags::default()
    });
    assert_eq!(expanded.offered_emotions().len(), 24);
}

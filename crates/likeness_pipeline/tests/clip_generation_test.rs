// Clip generation tests against a scripted gateway.
//
// All tests run on a paused clock so polling delays complete instantly.

mod test_utils;

use likeness_core::{ClipRequest, EmotionIntensity};
use likeness_error::{GenerationErrorKind, LikenessErrorKind};
use likeness_pipeline::{ClipGenerator, ClipSettings};
use std::time::Duration;
use test_utils::{MockCompletion, MockFetcher, MockGateway, MockVideo, fatal, png, transient};

fn settings() -> ClipSettings {
    ClipSettings {
        poll_interval: Duration::from_secs(5),
        poll_timeout: Some(Duration::from_secs(20)),
        ..ClipSettings::default()
    }
}

fn request(count: u32) -> ClipRequest {
    ClipRequest::builder()
        .source_image(png(b"actor"))
        .target_emotion("Happy")
        .clip_count(count)
        .build()
        .unwrap()
}

fn media(polls: usize, uri: &str) -> MockVideo {
    MockVideo::Media {
        polls,
        uri: uri.to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn test_partial_success_keeps_successful_clips() -> anyhow::Result<()> {
    let gateway = MockGateway::new().with_videos(vec![
        MockVideo::ProviderError {
            polls: 1,
            message: "quota".to_string(),
        },
        media(2, "https://media/clip-1"),
        MockVideo::SubmitError(fatal()),
    ]);
    let fetcher = MockFetcher::new().with_media("https://media/clip-1", vec![7, 7, 7]);
    let generator = ClipGenerator::new(gateway.clone(), fetcher, settings());

    let clips = generator.generate_clips(&request(3)).await?;

    assert_eq!(clips.len(), 1);
    assert_eq!(clips[0].media_uri.mime_type(), "video/mp4");
    assert_eq!(clips[0].media_uri.data(), &vec![7, 7, 7]);
    assert!(clips[0].consistency_score.is_none());
    assert_eq!(gateway.generate_calls(), 3);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_all_failures_report_lowest_attempt() {
    // Attempt 0 fails last; its failure must still be the one reported.
    let gateway = MockGateway::new().with_videos(vec![
        MockVideo::ProviderError {
            polls: 3,
            message: "first attempt".to_string(),
        },
        MockVideo::ProviderError {
            polls: 1,
            message: "second attempt".to_string(),
        },
        MockVideo::NoOperation,
    ]);
    let generator = ClipGenerator::new(gateway, MockFetcher::new(), settings());

    let err = generator.generate_clips(&request(3)).await.unwrap_err();

    match err.kind() {
        LikenessErrorKind::Generation(e) => assert_eq!(
            e.kind,
            GenerationErrorKind::ProviderFailure("first attempt".to_string())
        ),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_missing_operation_and_missing_media() {
    let gateway = MockGateway::new().with_videos(vec![MockVideo::NoOperation]);
    let generator = ClipGenerator::new(gateway, MockFetcher::new(), settings());
    let err = generator.generate_clips(&request(1)).await.unwrap_err();
    assert!(matches!(
        err.kind(),
        LikenessErrorKind::Generation(e) if e.kind == GenerationErrorKind::MissingOperation
    ));

    let gateway = MockGateway::new().with_videos(vec![MockVideo::Empty]);
    let generator = ClipGenerator::new(gateway, MockFetcher::new(), settings());
    let err = generator.generate_clips(&request(1)).await.unwrap_err();
    assert!(matches!(
        err.kind(),
        LikenessErrorKind::Generation(e) if e.kind == GenerationErrorKind::MissingMedia
    ));
}

#[tokio::test(start_paused = true)]
async fn test_fetch_failure_fails_attempt() {
    let gateway = MockGateway::new().with_videos(vec![media(1, "https://media/gone")]);
    let generator = ClipGenerator::new(gateway, MockFetcher::new(), settings());

    let err = generator.generate_clips(&request(1)).await.unwrap_err();

    assert!(matches!(err.kind(), LikenessErrorKind::Http(e) if e.status == Some(404)));
}

#[tokio::test(start_paused = true)]
async fn test_poll_timeout() {
    let gateway = MockGateway::new().with_videos(vec![MockVideo::NeverDone]);
    let generator = ClipGenerator::new(gateway.clone(), MockFetcher::new(), settings());
    let started = tokio::time::Instant::now();

    let err = generator.generate_clips(&request(1)).await.unwrap_err();

    match err.kind() {
        LikenessErrorKind::Generation(e) => match &e.kind {
            GenerationErrorKind::PollTimeout {
                operation,
                elapsed_secs,
            } => {
                assert_eq!(operation, "operations/mock-0");
                assert_eq!(*elapsed_secs, 20);
            }
            other => panic!("unexpected kind: {}", other),
        },
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(gateway.poll_calls(), 4);
    assert!(started.elapsed() >= Duration::from_secs(20));
}

#[tokio::test(start_paused = true)]
async fn test_polls_wait_between_snapshots() -> anyhow::Result<()> {
    let gateway = MockGateway::new().with_videos(vec![media(3, "https://media/slow")]);
    let fetcher = MockFetcher::new().with_media("https://media/slow", vec![1]);
    let generator = ClipGenerator::new(gateway.clone(), fetcher, settings());
    let started = tokio::time::Instant::now();

    let clips = generator.generate_clips(&request(1)).await?;

    assert_eq!(clips.len(), 1);
    assert_eq!(gateway.poll_calls(), 3);
    assert!(started.elapsed() >= Duration::from_secs(15));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_zero_clips_returns_empty_batch() -> anyhow::Result<()> {
    let gateway = MockGateway::new();
    let generator = ClipGenerator::new(gateway.clone(), MockFetcher::new(), settings());

    let clips = generator.generate_clips(&request(0)).await?;

    assert!(clips.is_empty());
    assert_eq!(gateway.generate_calls(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_rejected_clip_dropped_and_unscored_clip_kept() -> anyhow::Result<()> {
    // One clip describes a stranger and is rejected; the other cannot be
    // described at all and is kept without a score.
    let gateway = MockGateway::new_sequence(vec![
        MockCompletion::Text(r#"{"description": "stranger"}"#.to_string()),
        MockCompletion::Error(transient()),
    ])
    .with_embedding("stranger", vec![0.0, 1.0, 0.0])
    .with_videos(vec![media(1, "https://media/a"), media(1, "https://media/b")]);
    let fetcher = MockFetcher::new()
        .with_media("https://media/a", vec![1])
        .with_media("https://media/b", vec![2]);
    let generator = ClipGenerator::new(gateway.clone(), fetcher, settings());
    let request = ClipRequest::builder()
        .source_image(png(b"actor"))
        .target_emotion("Sad")
        .clip_count(2u32)
        .identity_embedding(vec![1.0, 0.0, 0.0])
        .validate_consistency(true)
        .build()?;

    let clips = generator.generate_clips(&request).await?;

    assert_eq!(clips.len(), 1);
    assert!(clips[0].consistency_score.is_none());
    assert_eq!(gateway.complete_calls(), 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_consistent_clip_carries_score() -> anyhow::Result<()> {
    let gateway = MockGateway::new_success(MockCompletion::Text(
        r#"{"description": "same person"}"#.to_string(),
    ))
    .with_embedding("same person", vec![0.5, 0.5, 0.0])
    .with_videos(vec![media(1, "https://media/a")]);
    let fetcher = MockFetcher::new().with_media("https://media/a", vec![1]);
    let generator = ClipGenerator::new(gateway, fetcher, settings());
    let request = ClipRequest::builder()
        .source_image(png(b"actor"))
        .target_emotion("Happy")
        .identity_embedding(vec![1.0, 1.0, 0.0])
        .validate_consistency(true)
        .build()?;

    let clips = generator.generate_clips(&request).await?;

    let score = clips[0].consistency_score.expect("clip should be scored");
    assert!((score - 1.0).abs() < 1e-6);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_embedding_without_validation_flag_skips_check() -> anyhow::Result<()> {
    let gateway = MockGateway::new().with_videos(vec![media(1, "https://media/a")]);
    let fetcher = MockFetcher::new().with_media("https://media/a", vec![1]);
    let generator = ClipGenerator::new(gateway.clone(), fetcher, settings());
    let request = ClipRequest::builder()
        .source_image(png(b"actor"))
        .target_emotion("Proud")
        .identity_embedding(vec![1.0, 0.0])
        .intensity(EmotionIntensity::Intense)
        .build()?;

    let clips = generator.generate_clips(&request).await?;

    assert_eq!(clips.len(), 1);
    assert_eq!(gateway.complete_calls(), 0);
    let submissions = gateway.submissions();
    assert!(submissions[0].prompt.contains("feeling Proud at intense intensity."));
    assert!(submissions[0].prompt.contains("Maintain exact facial structure"));
    assert_eq!(submissions[0].image.as_ref(), Some(&png(b"actor")));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_blank_emotion_rejected_before_submission() {
    let gateway = MockGateway::new();
    let generator = ClipGenerator::new(gateway.clone(), MockFetcher::new(), settings());
    let request = ClipRequest::builder()
        .source_image(png(b"actor"))
        .target_emotion("  ")
        .build()
        .unwrap();

    let err = generator.generate_clips(&request).await.unwrap_err();

    assert!(matches!(err.kind(), LikenessErrorKind::Request(_)));
    assert_eq!(gateway.generate_calls(), 0);
}

// Likeness refinement retry tests.

mod test_utils;

use likeness_core::RefineRequest;
use likeness_error::{ErrorClass, LikenessErrorKind, RefinementErrorKind};
use likeness_interface::{OutputMode, PromptPart};
use likeness_pipeline::LikenessRefiner;
use likeness_rate_limit::RefinementConfig;
use std::time::Duration;
use test_utils::{MockCompletion, MockGateway, fatal, png, rate_limited, transient};

fn retry() -> RefinementConfig {
    RefinementConfig {
        max_attempts: 5,
        base_delay_ms: 1000,
        max_jitter_ms: 0,
    }
}

#[tokio::test(start_paused = true)]
async fn test_recovers_after_rate_limits() -> anyhow::Result<()> {
    let gateway = MockGateway::new_sequence(vec![
        MockCompletion::Error(rate_limited()),
        MockCompletion::Error(rate_limited()),
        MockCompletion::Image(png(b"refined")),
    ]);
    let refiner = LikenessRefiner::new(gateway.clone(), retry());
    let started = tokio::time::Instant::now();

    let refined = refiner.refine(&png(b"base"), "Make the jawline sharper").await?;

    assert_eq!(refined, png(b"refined"));
    assert_eq!(gateway.complete_calls(), 3);
    // 2s then 4s
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(6));
    assert!(elapsed < Duration::from_secs(7));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_fatal_error_is_not_retried() {
    let gateway = MockGateway::new_error(fatal());
    let refiner = LikenessRefiner::new(gateway.clone(), retry());
    let started = tokio::time::Instant::now();

    let err = refiner.refine(&png(b"base"), "Lighten hair").await.unwrap_err();

    assert_eq!(err.class(), ErrorClass::Fatal);
    assert!(matches!(err.kind(), LikenessErrorKind::Gateway(_)));
    assert_eq!(gateway.complete_calls(), 1);
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_transient_error_is_not_retried() {
    let gateway = MockGateway::new_error(transient());
    let refiner = LikenessRefiner::new(gateway.clone(), retry());

    let err = refiner.refine(&png(b"base"), "Lighten hair").await.unwrap_err();

    assert_eq!(err.class(), ErrorClass::Transient);
    assert_eq!(gateway.complete_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_exhaustion() {
    let gateway = MockGateway::new_error(rate_limited());
    let refiner = LikenessRefiner::new(gateway.clone(), retry());
    let started = tokio::time::Instant::now();

    let err = refiner.refine(&png(b"base"), "Add freckles").await.unwrap_err();

    match err.kind() {
        LikenessErrorKind::Refinement(e) => match &e.kind {
            RefinementErrorKind::RetriesExhausted {
                attempts,
                last_message,
            } => {
                assert_eq!(*attempts, 5);
                assert!(last_message.contains("Quota exceeded"));
            }
            other => panic!("unexpected kind: {}", other),
        },
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(gateway.complete_calls(), 5);
    // 2s + 4s + 8s + 16s
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(30));
    assert!(elapsed < Duration::from_secs(31));
}

#[tokio::test(start_paused = true)]
async fn test_text_only_completion_is_an_error() {
    let gateway = MockGateway::new_success(MockCompletion::Text("I cannot edit this".to_string()));
    let refiner = LikenessRefiner::new(gateway.clone(), retry());

    let err = refiner.refine(&png(b"base"), "Smile").await.unwrap_err();

    assert!(matches!(
        err.kind(),
        LikenessErrorKind::Refinement(e) if e.kind == RefinementErrorKind::NoImageReturned
    ));
    assert_eq!(gateway.complete_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_request_shape() -> anyhow::Result<()> {
    let gateway = MockGateway::new_success(MockCompletion::Image(png(b"refined")));
    let refiner = LikenessRefiner::new(gateway.clone(), retry());

    let response = refiner
        .refine_request(&RefineRequest {
            base_image: png(b"base"),
            instructions: "Soften the lighting".to_string(),
        })
        .await?;

    assert_eq!(response.refined_image_uri, png(b"refined"));
    let requests = gateway.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].output_mode(), &OutputMode::TextAndImage);
    assert_eq!(
        requests[0].parts(),
        &vec![
            PromptPart::Media(png(b"base")),
            PromptPart::text("Soften the lighting"),
        ]
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_blank_instructions_rejected() {
    let gateway = MockGateway::new();
    let refiner = LikenessRefiner::new(gateway.clone(), retry());

    let err = refiner
        .refine_request(&RefineRequest {
            base_image: png(b"base"),
            instructions: " ".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), LikenessErrorKind::Request(_)));
    assert_eq!(gateway.complete_calls(), 0);
}

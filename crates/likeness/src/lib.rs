//! LikenessAI engine.
//!
//! Analyze footage of an actor, synthesize missing facial emotions as short
//! video clips, validate generated media against an identity embedding, and
//! refine a likeness image through natural-language instructions. All model
//! work is delegated to a remote generative provider (Gemini and Veo over
//! REST).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use likeness::{ClipRequest, DataUri, LikenessConfig, LikenessEngine};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = LikenessEngine::from_config(LikenessConfig::load()?)?;
//!
//! let request = ClipRequest::builder()
//!     .source_image(DataUri::new("image/png", std::fs::read("actor.png")?))
//!     .target_emotion("Ecstatic")
//!     .clip_count(3u32)
//!     .build()?;
//!
//! let batch = engine.generate_clips(&request).await?;
//! println!("Generated {} clips", batch.clips.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `likeness_error` - Error types and provider error classification
//! - `likeness_core` - Data URIs, requests, results, profiles, similarity
//! - `likeness_interface` - `ModelGateway` and `MediaFetcher` traits
//! - `likeness_rate_limit` - Configuration, feature flags, backoff schedule
//! - `likeness_storage` - Profile stores and the profile service
//! - `likeness_models` - Gemini REST gateway and HTTP media fetcher
//! - `likeness_pipeline` - Generation, validation and refinement orchestration
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod engine;
pub mod observability;

pub use engine::LikenessEngine;

pub use likeness_core::*;
pub use likeness_error::*;
pub use likeness_interface::*;
pub use likeness_models::*;
pub use likeness_pipeline::*;
pub use likeness_rate_limit::*;
pub use likeness_storage::*;

//! Error types for the LikenessAI engine.
//!
//! This crate provides the foundation error types used throughout the workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Provider errors are classified at the gateway boundary into a closed set of
//! [`ErrorClass`] values so orchestration code never inspects provider payloads.
//!
//! # Examples
//!
//! ```
//! use likeness_error::{HttpError, LikenessResult};
//!
//! fn fetch_clip() -> LikenessResult<Vec<u8>> {
//!     Err(HttpError::new("Failed to fetch video"))?
//! }
//!
//! assert!(fetch_clip().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod gateway;
mod generation;
mod http;
mod json;
mod media;
mod refinement;
mod request;
mod storage;

pub use config::ConfigError;
pub use error::{LikenessError, LikenessErrorKind, LikenessResult};
pub use gateway::{ErrorClass, GatewayError, GatewayErrorKind, RetryableError};
pub use generation::{GenerationError, GenerationErrorKind};
pub use http::HttpError;
pub use json::JsonError;
pub use media::{MediaError, MediaErrorKind};
pub use refinement::{RefinementError, RefinementErrorKind};
pub use request::{RequestError, RequestErrorKind};
pub use storage::{StorageError, StorageErrorKind};

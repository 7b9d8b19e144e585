//! Trait definitions for the LikenessAI model gateway.
//!
//! Orchestration code talks to the generative provider only through
//! [`ModelGateway`], and downloads generated media through [`MediaFetcher`].
//! Both are object safe so concrete providers and test doubles are
//! interchangeable.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{MediaFetcher, ModelGateway};
pub use types::{
    Completion, CompletionRequest, CompletionRequestBuilder, FetchedMedia, OutputMode,
    PromptPart, VideoGenerationRequest,
};

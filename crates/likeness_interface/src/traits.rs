//! Gateway and fetcher traits.

use crate::{Completion, CompletionRequest, FetchedMedia, VideoGenerationRequest};
use async_trait::async_trait;
use likeness_core::Operation;
use likeness_error::LikenessResult;
use std::sync::Arc;

/// Contract every generative provider must satisfy.
///
/// Errors returned from these methods are expected to be [`GatewayError`]s
/// already classified into an [`ErrorClass`], so callers never inspect
/// provider payloads.
///
/// [`GatewayError`]: likeness_error::GatewayError
/// [`ErrorClass`]: likeness_error::ErrorClass
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Synchronous prompt completion (text, JSON or text plus image).
    async fn complete(&self, req: &CompletionRequest) -> LikenessResult<Completion>;

    /// Embed text into a fixed-dimension vector.
    ///
    /// Only text is accepted; media must be described in text first.
    async fn embed(&self, text: &str) -> LikenessResult<Vec<f32>>;

    /// Submit a long-running video generation job.
    ///
    /// Returns `Ok(None)` when the provider answered without an operation
    /// handle.
    async fn generate_async(
        &self,
        req: &VideoGenerationRequest,
    ) -> LikenessResult<Option<Operation>>;

    /// Fetch a fresh snapshot of `operation`.
    async fn poll_operation(&self, operation: &Operation) -> LikenessResult<Operation>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;
}

/// Plain HTTP retrieval of generated media.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Download `uri`.
    ///
    /// Non-success responses and empty bodies are errors.
    async fn fetch(&self, uri: &str) -> LikenessResult<FetchedMedia>;
}

#[async_trait]
impl<T: ModelGateway + ?Sized> ModelGateway for Arc<T> {
    async fn complete(&self, req: &CompletionRequest) -> LikenessResult<Completion> {
        (**self).complete(req).await
    }

    async fn embed(&self, text: &str) -> LikenessResult<Vec<f32>> {
        (**self).embed(text).await
    }

    async fn generate_async(
        &self,
        req: &VideoGenerationRequest,
    ) -> LikenessResult<Option<Operation>> {
        (**self).generate_async(req).await
    }

    async fn poll_operation(&self, operation: &Operation) -> LikenessResult<Operation> {
        (**self).poll_operation(operation).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}

#[async_trait]
impl<T: MediaFetcher + ?Sized> MediaFetcher for Arc<T> {
    async fn fetch(&self, uri: &str) -> LikenessResult<FetchedMedia> {
        (**self).fetch(uri).await
    }
}

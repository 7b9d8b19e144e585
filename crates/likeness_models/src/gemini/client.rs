//! Gemini REST client implementing [`ModelGateway`].

use super::conversion;
use super::dto::{
    Content, EmbedContentRequest, EmbedContentResponse, GenerateContentResponse, OperationResource,
    Part,
};
use crate::{GatewayMetrics, HttpMediaFetcher};
use async_trait::async_trait;
use likeness_core::Operation;
use likeness_error::{GatewayError, GatewayErrorKind, LikenessError, LikenessResult};
use likeness_interface::{
    Completion, CompletionRequest, ModelGateway, OutputMode, VideoGenerationRequest,
};
use likeness_rate_limit::GatewayConfig;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

const PROVIDER: &str = "gemini";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini and Veo over the public REST API.
///
/// Authentication uses the `GEMINI_API_KEY` environment variable, falling
/// back to `GOOGLE_API_KEY`.
#[derive(Clone)]
pub struct GeminiGateway {
    client: Client,
    api_key: String,
    config: GatewayConfig,
    metrics_enabled: bool,
}

impl std::fmt::Debug for GeminiGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiGateway")
            .field("base_url", &self.config.base_url)
            .field("text_model", &self.config.text_model)
            .field("video_model", &self.config.video_model)
            .field("metrics_enabled", &self.metrics_enabled)
            .finish_non_exhaustive()
    }
}

impl GeminiGateway {
    /// Create a gateway using the API key from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Neither `GEMINI_API_KEY` nor `GOOGLE_API_KEY` is set
    /// - The HTTP client cannot be initialized
    #[instrument(skip_all)]
    pub fn new(config: &GatewayConfig) -> LikenessResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| GatewayError::new(GatewayErrorKind::MissingApiKey))?;
        Self::with_api_key(api_key, config)
    }

    /// Create a gateway with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip_all)]
    pub fn with_api_key(api_key: impl Into<String>, config: &GatewayConfig) -> LikenessResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| GatewayError::new(GatewayErrorKind::ClientCreation(e.to_string())))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            config: config.clone(),
            metrics_enabled: false,
        })
    }

    /// Record request metrics through the global OpenTelemetry meter.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.metrics_enabled = enabled;
        self
    }

    /// Fetcher for media URLs produced by this gateway's operations.
    pub fn media_fetcher(&self) -> HttpMediaFetcher {
        HttpMediaFetcher::new(self.client.clone(), Some(self.api_key.clone()))
    }

    /// Active configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/v1beta/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn model_endpoint(&self, model: &str, method: &str) -> String {
        self.endpoint(&format!("models/{}:{}", model, method))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> LikenessResult<T> {
        let response = request
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| GatewayError::new(GatewayErrorKind::Transport(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = conversion::error_from_response(status.as_u16(), &body);
            warn!(status = status.as_u16(), class = %err.kind.class(), "Provider returned an error");
            return Err(err.into());
        }

        response.json().await.map_err(|e| {
            GatewayError::new(GatewayErrorKind::MalformedResponse(format!(
                "Failed to parse response: {}",
                e
            )))
            .into()
        })
    }

    fn observe<T>(
        &self,
        operation: &str,
        model: &str,
        started: Instant,
        result: &LikenessResult<T>,
    ) {
        if !self.metrics_enabled {
            return;
        }
        let metrics = GatewayMetrics::get();
        match result {
            Ok(_) => metrics.record_request(
                PROVIDER,
                model,
                operation,
                started.elapsed().as_secs_f64(),
            ),
            Err(e) => metrics.record_error(PROVIDER, model, operation, &error_label(e)),
        }
    }
}

fn error_label(err: &LikenessError) -> String {
    err.class().to_string()
}

#[async_trait]
impl ModelGateway for GeminiGateway {
    #[instrument(skip(self, req), fields(parts = req.parts().len()))]
    async fn complete(&self, req: &CompletionRequest) -> LikenessResult<Completion> {
        let model = match (req.model(), req.output_mode()) {
            (Some(model), _) => model.clone(),
            (None, OutputMode::TextAndImage) => self.config.image_model.clone(),
            (None, _) => self.config.text_model.clone(),
        };
        let url = self.model_endpoint(&model, "generateContent");
        debug!(model = %model, "Sending generateContent request");

        let started = Instant::now();
        let body = conversion::to_generate_content(req);
        let result = match self
            .send::<GenerateContentResponse>(self.client.post(&url).json(&body))
            .await
        {
            Ok(resp) => conversion::from_generate_content(resp),
            Err(e) => Err(e),
        };
        self.observe("complete", &model, started, &result);
        result
    }

    #[instrument(skip(self, text), fields(chars = text.len()))]
    async fn embed(&self, text: &str) -> LikenessResult<Vec<f32>> {
        let model = &self.config.embedding_model;
        let url = self.model_endpoint(model, "embedContent");
        let body = EmbedContentRequest {
            model: format!("models/{}", model),
            content: Content {
                role: None,
                parts: vec![Part {
                    text: Some(text.to_string()),
                    inline_data: None,
                }],
            },
        };

        let started = Instant::now();
        let result = self
            .send::<EmbedContentResponse>(self.client.post(&url).json(&body))
            .await
            .and_then(|resp| {
                resp.embedding
                    .map(|e| e.values)
                    .filter(|values| !values.is_empty())
                    .ok_or_else(|| {
                        GatewayError::new(GatewayErrorKind::MalformedResponse(
                            "embedding response had no values".to_string(),
                        ))
                        .into()
                    })
            });
        self.observe("embed", model, started, &result);
        result
    }

    #[instrument(skip(self, req))]
    async fn generate_async(
        &self,
        req: &VideoGenerationRequest,
    ) -> LikenessResult<Option<Operation>> {
        let model = &self.config.video_model;
        let url = self.model_endpoint(model, "predictLongRunning");
        let body = conversion::to_predict_request(req, &self.config);

        let started = Instant::now();
        let result = self
            .send::<OperationResource>(self.client.post(&url).json(&body))
            .await
            .map(conversion::to_operation);
        self.observe("generate_async", model, started, &result);

        if let Ok(Some(operation)) = &result {
            debug!(operation = %operation.id, "Submitted video generation");
        }
        result
    }

    #[instrument(skip(self, operation), fields(operation = %operation.id))]
    async fn poll_operation(&self, operation: &Operation) -> LikenessResult<Operation> {
        let url = self.endpoint(&operation.id);

        let started = Instant::now();
        let result = self
            .send::<OperationResource>(self.client.get(&url))
            .await
            .and_then(|resource| {
                conversion::to_operation(resource).ok_or_else(|| {
                    GatewayError::new(GatewayErrorKind::MalformedResponse(
                        "operation snapshot had no name".to_string(),
                    ))
                    .into()
                })
            });
        self.observe("poll_operation", &self.config.video_model, started, &result);
        result
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

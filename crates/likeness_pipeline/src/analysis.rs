//! Training footage analysis.

use crate::prompts;
use likeness_core::{DataQualityReport, DataUri, SuitabilityReport};
use likeness_error::{LikenessResult, RequestError};
use likeness_interface::{CompletionRequest, ModelGateway, OutputMode, PromptPart};
use tracing::{info, instrument};

/// Produces suitability and quality reports for uploaded footage.
#[derive(Debug, Clone)]
pub struct VideoAnalyzer<G> {
    gateway: G,
}

impl<G: ModelGateway> VideoAnalyzer<G> {
    /// Analyzer backed by `gateway`.
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Narrative report on whether the footage suits likeness training.
    ///
    /// # Errors
    ///
    /// Propagates gateway and decoding failures.
    #[instrument(skip(self, video), fields(mime = %video.mime_type()))]
    pub async fn analyze_suitability(&self, video: &DataUri) -> LikenessResult<SuitabilityReport> {
        let request = json_request(video, prompts::SUITABILITY_PROMPT, prompts::suitability_schema())?;
        let report: SuitabilityReport = self.gateway.complete(&request).await?.json()?;
        info!(chars = report.suitability_report.len(), "Suitability report generated");
        Ok(report)
    }

    /// Rubric scores for the footage, clamped into their valid ranges.
    ///
    /// # Errors
    ///
    /// Propagates gateway and decoding failures.
    #[instrument(skip(self, video), fields(mime = %video.mime_type()))]
    pub async fn validate_quality(&self, video: &DataUri) -> LikenessResult<DataQualityReport> {
        let request = json_request(video, prompts::QUALITY_PROMPT, prompts::quality_schema())?;
        let report = self
            .gateway
            .complete(&request)
            .await?
            .json::<DataQualityReport>()?
            .clamped();
        info!(overall = report.overall_score, "Quality report generated");
        Ok(report)
    }
}

fn json_request(
    media: &DataUri,
    prompt: &str,
    schema: serde_json::Value,
) -> LikenessResult<CompletionRequest> {
    CompletionRequest::builder()
        .parts(vec![PromptPart::text(prompt), PromptPart::Media(media.clone())])
        .output_mode(OutputMode::Json(schema))
        .build()
        .map_err(|e| RequestError::from(e.to_string()).into())
}

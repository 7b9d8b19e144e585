//! Conversion between engine types and Gemini wire types.

use super::dto::{
    Content, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InlineData, OperationResource, Part, PredictLongRunningRequest, VideoImage, VideoInstance,
    VideoParameters,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use likeness_core::{DataUri, MediaResult, Operation};
use likeness_error::{GatewayError, GatewayErrorKind, LikenessResult};
use likeness_interface::{Completion, CompletionRequest, OutputMode, PromptPart, VideoGenerationRequest};
use likeness_rate_limit::GatewayConfig;

const DEFAULT_VIDEO_TYPE: &str = "video/mp4";

pub(crate) fn to_generate_content(req: &CompletionRequest) -> GenerateContentRequest {
    let parts = req
        .parts()
        .iter()
        .map(|part| match part {
            PromptPart::Text(text) => Part {
                text: Some(text.clone()),
                inline_data: None,
            },
            PromptPart::Media(uri) => Part {
                text: None,
                inline_data: Some(InlineData {
                    mime_type: uri.mime_type().clone(),
                    data: uri.encoded_data(),
                }),
            },
        })
        .collect();

    let generation_config = match req.output_mode() {
        OutputMode::Text => None,
        OutputMode::Json(schema) => Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema.clone()),
            response_modalities: None,
        }),
        OutputMode::TextAndImage => Some(GenerationConfig {
            response_modalities: Some(vec!["TEXT".to_string(), "IMAGE".to_string()]),
            ..GenerationConfig::default()
        }),
    };

    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts,
        }],
        generation_config,
    }
}

pub(crate) fn from_generate_content(resp: GenerateContentResponse) -> LikenessResult<Completion> {
    let Some(candidate) = resp.candidates.into_iter().next() else {
        let reason = resp
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map(|r| format!("prompt blocked: {}", r))
            .unwrap_or_else(|| "response contained no candidates".to_string());
        return Err(GatewayError::new(GatewayErrorKind::MalformedResponse(reason)).into());
    };

    let mut text = String::new();
    let mut media = Vec::new();
    for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
        if let Some(t) = part.text {
            text.push_str(&t);
        }
        if let Some(inline) = part.inline_data {
            let data = STANDARD.decode(inline.data.as_bytes()).map_err(|e| {
                GatewayError::new(GatewayErrorKind::MalformedResponse(format!(
                    "inline data is not base64: {}",
                    e
                )))
            })?;
            media.push(DataUri::new(inline.mime_type, data));
        }
    }

    if text.is_empty() && media.is_empty() {
        let reason = candidate
            .finish_reason
            .map(|r| format!("candidate finished with {} and no content", r))
            .unwrap_or_else(|| "candidate had no content".to_string());
        return Err(GatewayError::new(GatewayErrorKind::MalformedResponse(reason)).into());
    }

    Ok(Completion::new(text, media))
}

pub(crate) fn to_predict_request(
    req: &VideoGenerationRequest,
    config: &GatewayConfig,
) -> PredictLongRunningRequest {
    PredictLongRunningRequest {
        instances: vec![VideoInstance {
            prompt: req.prompt.clone(),
            image: req.image.as_ref().map(|uri| VideoImage {
                bytes_base64_encoded: uri.encoded_data(),
                mime_type: uri.mime_type().clone(),
            }),
        }],
        parameters: VideoParameters {
            person_generation: config.person_generation.clone(),
            duration_seconds: config.duration_seconds,
            aspect_ratio: config.aspect_ratio.clone(),
        },
    }
}

/// Map an operation resource to a snapshot; `None` when it has no name.
pub(crate) fn to_operation(resource: OperationResource) -> Option<Operation> {
    let id = resource.name?;
    if !resource.done {
        return Some(Operation::pending(id));
    }

    if let Some(status) = resource.error {
        let message = status.message.unwrap_or_else(|| match status.code {
            Some(code) => format!("operation failed with code {}", code),
            None => "operation failed".to_string(),
        });
        return Some(Operation::failed(id, message));
    }

    let video_response = resource
        .response
        .and_then(|r| r.generate_video_response)
        .unwrap_or_default();

    let video = video_response
        .generated_samples
        .into_iter()
        .filter_map(|s| s.video)
        .find_map(|v| v.uri.map(|uri| (uri, v.mime_type)));

    match video {
        Some((uri, mime_type)) => Some(Operation::succeeded(
            id,
            MediaResult {
                media_uri: uri,
                content_type: mime_type.unwrap_or_else(|| DEFAULT_VIDEO_TYPE.to_string()),
            },
        )),
        None if !video_response.rai_media_filtered_reasons.is_empty() => Some(Operation::failed(
            id,
            video_response.rai_media_filtered_reasons.join("; "),
        )),
        None => Some(Operation {
            id,
            done: true,
            output: None,
            error: None,
        }),
    }
}

/// Classify a non-success HTTP response.
pub(crate) fn error_from_response(status_code: u16, body: &str) -> GatewayError {
    let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok().map(|e| e.error);

    let (reason, message) = match parsed {
        Some(error) => {
            let detail_reasons: Vec<String> =
                error.details.into_iter().filter_map(|d| d.reason).collect();
            let rate_limit_reason = detail_reasons
                .iter()
                .find(|r| r.to_ascii_uppercase().starts_with("RATE_LIMIT"))
                .cloned();
            let reason = rate_limit_reason
                .or(error.status)
                .or_else(|| detail_reasons.into_iter().next());
            (reason, error.message.unwrap_or_else(|| body.to_string()))
        }
        None => (None, body.to_string()),
    };

    GatewayError::new(GatewayErrorKind::HttpStatus {
        status_code,
        reason,
        message,
    })
}

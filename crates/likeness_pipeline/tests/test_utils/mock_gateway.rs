//! Scripted gateway and fetcher for testing.

#![allow(dead_code)]

use async_trait::async_trait;
use likeness_core::{DataUri, MediaResult, Operation};
use likeness_error::{GatewayError, GatewayErrorKind, HttpError, LikenessResult};
use likeness_interface::{
    Completion, CompletionRequest, FetchedMedia, MediaFetcher, ModelGateway,
    VideoGenerationRequest,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// A single scripted completion.
#[derive(Debug, Clone)]
pub enum MockCompletion {
    /// Text-only completion
    Text(String),
    /// Completion carrying one image
    Image(DataUri),
    /// Gateway failure
    Error(GatewayErrorKind),
}

/// Scripted outcome of one video generation submission.
#[derive(Debug, Clone)]
pub enum MockVideo {
    /// Done after `polls` polls, with media at `uri`
    Media { polls: usize, uri: String },
    /// Done after `polls` polls, with a provider error
    ProviderError { polls: usize, message: String },
    /// Done after one poll, without media or error
    Empty,
    /// Submission answered without an operation handle
    NoOperation,
    /// Submission rejected by the gateway
    SubmitError(GatewayErrorKind),
    /// Never completes
    NeverDone,
}

#[derive(Debug, Default)]
struct MockState {
    completions: VecDeque<MockCompletion>,
    fallback_completion: Option<MockCompletion>,
    embeddings: HashMap<String, Vec<f32>>,
    videos: VecDeque<MockVideo>,
    operations: HashMap<String, (usize, MockVideo)>,
    requests: Vec<CompletionRequest>,
    submissions: Vec<VideoGenerationRequest>,
    complete_calls: usize,
    embed_calls: usize,
    poll_calls: usize,
}

/// Mock gateway for testing.
///
/// Completions are served from a queue (then from an optional fallback),
/// embeddings are looked up by text, and video submissions consume a queue of
/// [`MockVideo`] outcomes in submission order. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockGateway {
    state: Arc<Mutex<MockState>>,
}

impl MockGateway {
    /// Create a mock gateway with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock gateway that always returns the given completion.
    pub fn new_success(completion: MockCompletion) -> Self {
        Self::new().with_fallback_completion(completion)
    }

    /// Create a mock gateway whose completions always fail with `error`.
    pub fn new_error(error: GatewayErrorKind) -> Self {
        Self::new().with_fallback_completion(MockCompletion::Error(error))
    }

    /// Create a mock gateway with a sequence of completions.
    pub fn new_sequence(completions: Vec<MockCompletion>) -> Self {
        let mock = Self::new();
        mock.lock().completions.extend(completions);
        mock
    }

    /// Completion served once the queue is empty.
    pub fn with_fallback_completion(self, completion: MockCompletion) -> Self {
        self.lock().fallback_completion = Some(completion);
        self
    }

    /// Embedding returned for `text`.
    pub fn with_embedding(self, text: impl Into<String>, embedding: Vec<f32>) -> Self {
        self.lock().embeddings.insert(text.into(), embedding);
        self
    }

    /// Outcomes for successive video submissions.
    pub fn with_videos(self, videos: Vec<MockVideo>) -> Self {
        self.lock().videos.extend(videos);
        self
    }

    /// Number of completion calls.
    pub fn complete_calls(&self) -> usize {
        self.lock().complete_calls
    }

    /// Number of embedding calls.
    pub fn embed_calls(&self) -> usize {
        self.lock().embed_calls
    }

    /// Number of video submissions.
    pub fn generate_calls(&self) -> usize {
        self.lock().submissions.len()
    }

    /// Number of operation polls.
    pub fn poll_calls(&self) -> usize {
        self.lock().poll_calls
    }

    /// Completion requests received, in order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.lock().requests.clone()
    }

    /// Video submissions received, in order.
    pub fn submissions(&self) -> Vec<VideoGenerationRequest> {
        self.lock().submissions.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }
}

fn exhausted(what: &str) -> GatewayError {
    GatewayError::new(GatewayErrorKind::MalformedResponse(format!(
        "Mock {} exhausted",
        what
    )))
}

#[async_trait]
impl ModelGateway for MockGateway {
    async fn complete(&self, req: &CompletionRequest) -> LikenessResult<Completion> {
        let mut state = self.lock();
        state.complete_calls += 1;
        state.requests.push(req.clone());
        let next = state
            .completions
            .pop_front()
            .or_else(|| state.fallback_completion.clone());
        match next {
            Some(MockCompletion::Text(text)) => Ok(Completion::from_text(text)),
            Some(MockCompletion::Image(image)) => Ok(Completion::new("", vec![image])),
            Some(MockCompletion::Error(kind)) => Err(GatewayError::new(kind).into()),
            None => Err(exhausted("completion sequence").into()),
        }
    }

    async fn embed(&self, text: &str) -> LikenessResult<Vec<f32>> {
        let mut state = self.lock();
        state.embed_calls += 1;
        state
            .embeddings
            .get(text)
            .cloned()
            .ok_or_else(|| exhausted(&format!("embedding for '{}'", text)).into())
    }

    async fn generate_async(
        &self,
        req: &VideoGenerationRequest,
    ) -> LikenessResult<Option<Operation>> {
        let mut state = self.lock();
        let index = state.submissions.len();
        state.submissions.push(req.clone());
        let Some(video) = state.videos.pop_front() else {
            return Err(exhausted("video sequence").into());
        };
        match video {
            MockVideo::NoOperation => Ok(None),
            MockVideo::SubmitError(kind) => Err(GatewayError::new(kind).into()),
            other => {
                let id = format!("operations/mock-{}", index);
                state.operations.insert(id.clone(), (0, other));
                Ok(Some(Operation::pending(id)))
            }
        }
    }

    async fn poll_operation(&self, operation: &Operation) -> LikenessResult<Operation> {
        let mut state = self.lock();
        state.poll_calls += 1;
        let Some((polls, video)) = state.operations.get_mut(&operation.id) else {
            return Err(exhausted("operation table").into());
        };
        *polls += 1;
        let polls = *polls;
        let id = operation.id.clone();
        let snapshot = match video {
            MockVideo::Media { polls: needed, uri } if polls >= *needed => Operation::succeeded(
                id,
                MediaResult {
                    media_uri: uri.clone(),
                    content_type: "video/mp4".to_string(),
                },
            ),
            MockVideo::ProviderError { polls: needed, message } if polls >= *needed => {
                Operation::failed(id, message.clone())
            }
            MockVideo::Empty => Operation {
                id,
                done: true,
                output: None,
                error: None,
            },
            _ => Operation::pending(id),
        };
        Ok(snapshot)
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Mock fetcher serving fixed bytes per URI.
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    media: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    calls: Arc<Mutex<usize>>,
}

impl MockFetcher {
    /// Create a fetcher with no media.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `bytes` for `uri`.
    pub fn with_media(self, uri: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.media.lock().unwrap().insert(uri.into(), bytes);
        self
    }

    /// Number of fetches.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl MediaFetcher for MockFetcher {
    async fn fetch(&self, uri: &str) -> LikenessResult<FetchedMedia> {
        *self.calls.lock().unwrap() += 1;
        match self.media.lock().unwrap().get(uri) {
            Some(bytes) => Ok(FetchedMedia {
                bytes: bytes.clone(),
                content_type: Some("video/mp4".to_string()),
            }),
            None => Err(HttpError::with_status(404, format!("Failed to fetch video: {}", uri)).into()),
        }
    }
}

/// Provider quota error.
pub fn rate_limited() -> GatewayErrorKind {
    GatewayErrorKind::HttpStatus {
        status_code: 429,
        reason: Some("RESOURCE_EXHAUSTED".to_string()),
        message: "Quota exceeded".to_string(),
    }
}

/// Temporary provider outage.
pub fn transient() -> GatewayErrorKind {
    GatewayErrorKind::HttpStatus {
        status_code: 503,
        reason: Some("UNAVAILABLE".to_string()),
        message: "The model is overloaded".to_string(),
    }
}

/// Permanent provider rejection.
pub fn fatal() -> GatewayErrorKind {
    GatewayErrorKind::HttpStatus {
        status_code: 400,
        reason: Some("INVALID_ARGUMENT".to_string()),
        message: "Request contains an invalid argument".to_string(),
    }
}

/// Small PNG data URI.
pub fn png(bytes: &[u8]) -> DataUri {
    DataUri::new("image/png", bytes.to_vec())
}

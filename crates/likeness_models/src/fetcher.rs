//! Plain HTTP download of generated media.

use async_trait::async_trait;
use likeness_error::{HttpError, LikenessResult};
use likeness_interface::{FetchedMedia, MediaFetcher};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument};

/// Downloads provider media URLs.
///
/// Provider file URLs require the API key, which is sent in the
/// `x-goog-api-key` header when configured.
#[derive(Clone)]
pub struct HttpMediaFetcher {
    client: Client,
    api_key: Option<String>,
}

impl std::fmt::Debug for HttpMediaFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMediaFetcher")
            .field("authenticated", &self.api_key.is_some())
            .finish()
    }
}

impl Default for HttpMediaFetcher {
    fn default() -> Self {
        Self::new(Client::new(), None)
    }
}

impl HttpMediaFetcher {
    /// Fetcher over an existing client.
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }
}

#[async_trait]
impl MediaFetcher for HttpMediaFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, uri: &str) -> LikenessResult<FetchedMedia> {
        let mut request = self.client.get(uri);
        if let Some(key) = &self.api_key {
            request = request.header("x-goog-api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| HttpError::new(format!("Failed to fetch video: {}", e)))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(HttpError::with_status(
                status.as_u16(),
                format!("Failed to fetch video: HTTP {}", status.as_u16()),
            )
            .into());
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| HttpError::new(format!("Failed to read video body: {}", e)))?;
        if bytes.is_empty() {
            return Err(HttpError::new("Failed to fetch video: empty body").into());
        }

        debug!(bytes = bytes.len(), content_type = ?content_type, "Downloaded media");
        Ok(FetchedMedia {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

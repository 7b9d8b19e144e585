//! Firebase Realtime Database profile store.
//!
//! Profiles are stored as JSON documents under `actorProfiles/{id}`:
//!
//! ```text
//! GET    {url}/actorProfiles.json        list
//! GET    {url}/actorProfiles/{id}.json   get (null when absent)
//! PUT    {url}/actorProfiles/{id}.json   put
//! DELETE {url}/actorProfiles/{id}.json   delete
//! ```

use crate::ProfileStore;
use likeness_core::ActorProfile;
use likeness_error::{LikenessResult, StorageError, StorageErrorKind};
use reqwest::{Client, Method, RequestBuilder};
use std::collections::HashMap;
use tracing::{debug, instrument};
use url::Url;

const COLLECTION: &str = "actorProfiles";

/// Profile store backed by the Firebase Realtime Database REST API.
pub struct FirebaseProfileStore {
    client: Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl std::fmt::Debug for FirebaseProfileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseProfileStore")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.auth_token.is_some())
            .finish()
    }
}

impl FirebaseProfileStore {
    /// Store rooted at `database_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL does not parse.
    #[instrument(skip(auth_token))]
    pub fn new(database_url: &str, auth_token: Option<String>) -> LikenessResult<Self> {
        let mut base_url = Url::parse(database_url).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidConfig(format!(
                "invalid database URL {}: {}",
                database_url, e
            )))
        })?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        tracing::info!(url = %base_url, "Created Firebase profile store");
        Ok(Self {
            client: Client::new(),
            base_url,
            auth_token,
        })
    }

    fn document_url(&self, id: Option<&str>) -> LikenessResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                StorageError::new(StorageErrorKind::InvalidConfig(format!(
                    "database URL cannot hold a path: {}",
                    self.base_url
                )))
            })?;
            segments.pop_if_empty();
            match id {
                Some(id) => {
                    check_key(id)?;
                    segments.push(COLLECTION).push(&format!("{}.json", id));
                }
                None => {
                    segments.push(&format!("{}.json", COLLECTION));
                }
            }
        }
        if let Some(token) = &self.auth_token {
            url.query_pairs_mut().append_pair("auth", token);
        }
        Ok(url)
    }

    fn request(&self, method: Method, id: Option<&str>) -> LikenessResult<RequestBuilder> {
        Ok(self.client.request(method, self.document_url(id)?))
    }

    async fn send(&self, request: RequestBuilder) -> LikenessResult<serde_json::Value> {
        let response = request.send().await.map_err(|e| {
            StorageError::new(StorageErrorKind::Unavailable(e.to_string()))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::new(StorageErrorKind::Backend(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body
            )))
            .into());
        }

        response.json().await.map_err(|e| {
            StorageError::new(StorageErrorKind::Serialization(e.to_string())).into()
        })
    }
}

/// Realtime Database keys may not contain `. $ # [ ] /` or control characters.
fn check_key(id: &str) -> Result<(), StorageError> {
    let forbidden = |c: char| matches!(c, '.' | '$' | '#' | '[' | ']' | '/' | '?') || c.is_control();
    if id.is_empty() || id.contains(forbidden) {
        return Err(StorageError::new(StorageErrorKind::InvalidId(id.to_string())));
    }
    Ok(())
}

fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> LikenessResult<T> {
    serde_json::from_value(value)
        .map_err(|e| StorageError::new(StorageErrorKind::Serialization(e.to_string())).into())
}

#[async_trait::async_trait]
impl ProfileStore for FirebaseProfileStore {
    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> LikenessResult<Option<ActorProfile>> {
        let value = self.send(self.request(Method::GET, Some(id))?).await?;
        debug!(found = !value.is_null(), "Fetched profile");
        decode(value)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> LikenessResult<Vec<ActorProfile>> {
        let value = self.send(self.request(Method::GET, None)?).await?;
        let profiles: Option<HashMap<String, ActorProfile>> = decode(value)?;
        Ok(profiles.map(|p| p.into_values().collect()).unwrap_or_default())
    }

    #[instrument(skip(self, profile), fields(id = %profile.id))]
    async fn put(&self, profile: &ActorProfile) -> LikenessResult<()> {
        let request = self.request(Method::PUT, Some(&profile.id))?.json(profile);
        self.send(request).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> LikenessResult<bool> {
        if self.get(id).await?.is_none() {
            return Ok(false);
        }
        self.send(self.request(Method::DELETE, Some(id))?).await?;
        Ok(true)
    }

    fn backend_name(&self) -> &'static str {
        "firebase"
    }
}

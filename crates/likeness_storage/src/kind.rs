//! Construction-time selection of the profile backend.

use crate::{FirebaseProfileStore, InMemoryProfileStore, ProfileStore};
use likeness_error::{LikenessResult, StorageError, StorageErrorKind};
use likeness_rate_limit::LikenessConfig;
use std::sync::Arc;

/// Which profile backend to build.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProfileStoreKind {
    /// Process-local map
    #[default]
    Memory,
    /// Firebase Realtime Database
    Firebase {
        /// Database URL
        url: String,
        /// Optional auth token appended as `?auth=`
        auth_token: Option<String>,
    },
}

impl ProfileStoreKind {
    /// Pick the backend described by configuration.
    ///
    /// The cloud backend is chosen only when the `cloud_storage` flag is on;
    /// the auth token is read from the environment variable the configuration
    /// names.
    ///
    /// # Errors
    ///
    /// Returns an error when cloud storage is enabled without a database URL.
    pub fn from_config(config: &LikenessConfig) -> LikenessResult<Self> {
        if !config.features.cloud_storage {
            return Ok(Self::Memory);
        }
        let url = config.storage.firebase_url.clone().ok_or_else(|| {
            StorageError::new(StorageErrorKind::InvalidConfig(
                "cloud storage enabled without storage.firebase_url".to_string(),
            ))
        })?;
        let auth_token = std::env::var(&config.storage.firebase_auth_env)
            .ok()
            .filter(|token| !token.is_empty());
        Ok(Self::Firebase { url, auth_token })
    }

    /// Build the store.
    ///
    /// # Errors
    ///
    /// Returns an error when the cloud backend cannot be configured.
    pub fn build(self) -> LikenessResult<Arc<dyn ProfileStore>> {
        let store: Arc<dyn ProfileStore> = match self {
            Self::Memory => Arc::new(InMemoryProfileStore::new()),
            Self::Firebase { url, auth_token } => {
                Arc::new(FirebaseProfileStore::new(&url, auth_token)?)
            }
        };
        tracing::debug!(backend = store.backend_name(), "Built profile store");
        Ok(store)
    }
}

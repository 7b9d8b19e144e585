//! Process-local profile store.

use crate::ProfileStore;
use likeness_core::ActorProfile;
use likeness_error::LikenessResult;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Profile store backed by a concurrency-safe map.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, ActorProfile>>,
}

impl InMemoryProfileStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get(&self, id: &str) -> LikenessResult<Option<ActorProfile>> {
        Ok(self.profiles.read().await.get(id).cloned())
    }

    async fn list(&self) -> LikenessResult<Vec<ActorProfile>> {
        Ok(self.profiles.read().await.values().cloned().collect())
    }

    async fn put(&self, profile: &ActorProfile) -> LikenessResult<()> {
        self.profiles
            .write()
            .await
            .insert(profile.id.clone(), profile.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> LikenessResult<bool> {
        Ok(self.profiles.write().await.remove(id).is_some())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

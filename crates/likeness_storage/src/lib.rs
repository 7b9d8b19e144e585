//! Actor profile storage for the LikenessAI engine.
//!
//! Profiles live behind the [`ProfileStore`] trait, a plain keyed store with
//! last-write-wins semantics. Two backends are provided:
//!
//! - [`InMemoryProfileStore`]: process-local map, the default
//! - [`FirebaseProfileStore`]: Firebase Realtime Database over REST
//!
//! The backend is picked once at construction time through
//! [`ProfileStoreKind`]; callers only ever see `Arc<dyn ProfileStore>`.
//! [`ProfileService`] layers the profile mutation rules on top.
//!
//! # Example
//!
//! ```rust
//! use likeness_storage::{InMemoryProfileStore, ProfileService};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = ProfileService::new(Arc::new(InMemoryProfileStore::new()));
//! let profile = service.create_profile("Ada").await?;
//! let updated = service.update_consistency_score(&profile.id, 0.9).await?;
//! assert_eq!(updated.map(|p| p.consistency_score), Some(0.9));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use likeness_core::ActorProfile;
use likeness_error::LikenessResult;

mod firebase;
mod kind;
mod memory;
mod service;

pub use firebase::FirebaseProfileStore;
pub use kind::ProfileStoreKind;
pub use likeness_error::{StorageError, StorageErrorKind};
pub use memory::InMemoryProfileStore;
pub use service::ProfileService;

/// Keyed persistence for actor profiles.
///
/// No locking spans a read-modify-write sequence; concurrent writers to the
/// same profile race and the last `put` wins.
#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch a profile by id.
    async fn get(&self, id: &str) -> LikenessResult<Option<ActorProfile>>;

    /// All stored profiles, in no particular order.
    async fn list(&self) -> LikenessResult<Vec<ActorProfile>>;

    /// Insert or replace a profile.
    async fn put(&self, profile: &ActorProfile) -> LikenessResult<()>;

    /// Remove a profile; `false` when it did not exist.
    async fn delete(&self, id: &str) -> LikenessResult<bool>;

    /// Backend name (e.g., "memory", "firebase").
    fn backend_name(&self) -> &'static str;
}

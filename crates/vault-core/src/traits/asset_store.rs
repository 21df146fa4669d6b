//! Asset store trait for pluggable binary-asset hosting backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// A durable reference to a stored asset.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StoredAsset {
    /// Public URL at which the asset can be fetched.
    pub url: String,
    /// Opaque handle used to delete the asset later.
    pub public_id: String,
}

/// Result of an asset removal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The asset existed and was removed.
    Removed,
    /// The asset host had no asset under that handle. Treated as success:
    /// the local record remains the source of truth.
    AlreadyGone,
}

/// Trait for binary asset hosting backends.
///
/// Implementations exist for the Cloudinary HTTP API and the local
/// filesystem. The [`AssetStore`] trait is defined here in `vault-core`
/// and implemented in `vault-storage`.
#[async_trait]
pub trait AssetStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "cloudinary", "local").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store a binary blob under a namespacing hint (e.g. `users/<id>`)
    /// and return its durable URL and deletion handle.
    async fn store(&self, data: Bytes, namespace: &str, filename: &str) -> AppResult<StoredAsset>;

    /// Remove a previously stored asset by its deletion handle.
    async fn remove(&self, public_id: &str) -> AppResult<RemoveOutcome>;
}

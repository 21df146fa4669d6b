//! Local filesystem asset store.
//!
//! Stores blobs under a root directory and serves them from a configurable
//! URL prefix. The deletion handle is the path relative to the root.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

use vault_core::config::LocalAssetStoreConfig;
use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;
use vault_core::traits::{AssetStore, RemoveOutcome, StoredAsset};

/// Local filesystem asset store.
#[derive(Debug, Clone)]
pub struct LocalAssetStore {
    /// Root directory for all stored assets.
    root: PathBuf,
    /// URL prefix under which assets are served.
    public_base_url: String,
}

impl LocalAssetStore {
    /// Create a new local asset store rooted at the configured path.
    pub async fn new(config: &LocalAssetStoreConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create asset root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a relative handle to an absolute path within the root.
    fn resolve(&self, public_id: &str) -> PathBuf {
        let clean = public_id.trim_start_matches('/');
        self.root.join(clean)
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.exists() && self.root.is_dir())
    }

    async fn store(&self, data: Bytes, namespace: &str, filename: &str) -> AppResult<StoredAsset> {
        let public_id = format!(
            "{}/{}_{}",
            namespace.trim_matches('/'),
            Uuid::new_v4(),
            sanitize_filename(filename)
        );
        let full_path = self.resolve(&public_id);
        self.ensure_parent(&full_path).await?;

        let mut file = fs::File::create(&full_path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create asset file: {public_id}"),
                e,
            )
        })?;
        file.write_all(&data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write asset file: {public_id}"),
                e,
            )
        })?;
        file.flush().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to flush asset file", e)
        })?;

        debug!(public_id = %public_id, size = data.len(), "Stored local asset");

        Ok(StoredAsset {
            url: format!("{}/{}", self.public_base_url, public_id),
            public_id,
        })
    }

    async fn remove(&self, public_id: &str) -> AppResult<RemoveOutcome> {
        let full_path = self.resolve(public_id);
        match fs::remove_file(&full_path).await {
            Ok(()) => Ok(RemoveOutcome::Removed),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(RemoveOutcome::AlreadyGone),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to remove asset: {public_id}"),
                e,
            )),
        }
    }
}

/// Strip path separators and other surprises from an uploaded filename.
fn sanitize_filename(filename: &str) -> String {
    let name: String = filename
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect();
    let trimmed = name.trim_matches('.').trim();
    if trimmed.is_empty() {
        "asset".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_in_tempdir() -> (tempfile::TempDir, LocalAssetStore) {
        let dir = tempfile::tempdir().unwrap();
        let config = LocalAssetStoreConfig {
            root_path: dir.path().to_string_lossy().into_owned(),
            public_base_url: "/uploads".to_string(),
        };
        let store = LocalAssetStore::new(&config).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn store_writes_bytes_and_returns_handle() {
        let (_dir, store) = store_in_tempdir().await;

        let asset = store
            .store(Bytes::from_static(b"png bytes"), "users/u1", "beach.png")
            .await
            .unwrap();

        assert!(asset.url.starts_with("/uploads/users/u1/"));
        assert!(asset.public_id.ends_with("beach.png"));

        let on_disk = tokio::fs::read(store.resolve(&asset.public_id)).await.unwrap();
        assert_eq!(on_disk, b"png bytes");
    }

    #[tokio::test]
    async fn remove_is_already_gone_the_second_time() {
        let (_dir, store) = store_in_tempdir().await;

        let asset = store
            .store(Bytes::from_static(b"x"), "users/u1", "a.png")
            .await
            .unwrap();

        assert_eq!(
            store.remove(&asset.public_id).await.unwrap(),
            RemoveOutcome::Removed
        );
        assert_eq!(
            store.remove(&asset.public_id).await.unwrap(),
            RemoveOutcome::AlreadyGone
        );
    }

    #[test]
    fn sanitize_filename_strips_separators() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "_.._etc_passwd");
        assert_eq!(sanitize_filename("photo.png"), "photo.png");
        assert_eq!(sanitize_filename(""), "asset");
    }
}

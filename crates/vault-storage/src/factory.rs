//! Provider selection from configuration.

use std::sync::Arc;

use tracing::info;

use vault_core::config::AssetStoreConfig;
use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::traits::AssetStore;

use crate::providers::cloudinary::CloudinaryAssetStore;
use crate::providers::local::LocalAssetStore;

/// Build the asset store named by `config.provider`.
pub async fn build_asset_store(config: &AssetStoreConfig) -> AppResult<Arc<dyn AssetStore>> {
    let store: Arc<dyn AssetStore> = match config.provider.as_str() {
        "cloudinary" => Arc::new(CloudinaryAssetStore::new(config)?),
        "local" => Arc::new(LocalAssetStore::new(&config.local).await?),
        other => {
            return Err(AppError::configuration(format!(
                "Unknown asset store provider: {other}"
            )));
        }
    };

    info!(provider = store.provider_type(), "Asset store initialized");
    Ok(store)
}

//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use vault_auth::jwt::decoder::JwtDecoder;
use vault_core::config::AppConfig;
use vault_core::traits::AssetStore;
use vault_database::connection::DatabasePool;
use vault_service::folder::service::FolderService;
use vault_service::image::service::ImageService;
use vault_service::user::service::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Database pool, kept around for health checks.
    pub db: DatabasePool,
    /// Asset host the image binaries live on.
    pub asset_store: Arc<dyn AssetStore>,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// User account service.
    pub user_service: Arc<UserService>,
    /// Folder service.
    pub folder_service: Arc<FolderService>,
    /// Image service.
    pub image_service: Arc<ImageService>,
}

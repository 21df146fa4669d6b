//! Asset store configuration.

use serde::{Deserialize, Serialize};

/// Top-level asset store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetStoreConfig {
    /// Which provider to use: `"cloudinary"` or `"local"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Timeout applied to every asset host request, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Maximum upload size in bytes (default 10 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Local filesystem provider configuration.
    #[serde(default)]
    pub local: LocalAssetStoreConfig,
    /// Cloudinary provider configuration.
    #[serde(default)]
    pub cloudinary: CloudinaryConfig,
}

impl Default for AssetStoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            request_timeout_seconds: default_request_timeout(),
            max_upload_size_bytes: default_max_upload(),
            local: LocalAssetStoreConfig::default(),
            cloudinary: CloudinaryConfig::default(),
        }
    }
}

/// Local filesystem asset store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalAssetStoreConfig {
    /// Root path for stored assets.
    #[serde(default = "default_local_root")]
    pub root_path: String,
    /// Base URL prefix under which stored assets are served.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for LocalAssetStoreConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
            public_base_url: default_public_base_url(),
        }
    }
}

/// Cloudinary asset host configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CloudinaryConfig {
    /// Cloud name (identifies the account in API URLs).
    #[serde(default)]
    pub cloud_name: String,
    /// API key.
    #[serde(default)]
    pub api_key: String,
    /// API secret used to sign requests.
    #[serde(default)]
    pub api_secret: String,
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_upload() -> u64 {
    10_485_760 // 10 MB
}

fn default_local_root() -> String {
    "./data/uploads".to_string()
}

fn default_public_base_url() -> String {
    "/uploads".to_string()
}

//! Cloudinary asset host provider.
//!
//! Uploads go to `POST /v1_1/{cloud}/image/upload` as signed multipart
//! requests; deletions go to `POST /v1_1/{cloud}/image/destroy`. A destroy
//! answered with `"not found"` maps to [`RemoveOutcome::AlreadyGone`] so a
//! stray remote deletion never blocks removing the local record.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use vault_core::config::{AssetStoreConfig, CloudinaryConfig};
use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::traits::{AssetStore, RemoveOutcome, StoredAsset};

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Cloudinary asset store backed by a timeout-bounded HTTP client.
///
/// Requests are signed with SHA-256, so the Cloudinary account's signature
/// algorithm must be set to SHA-256 as well (new accounts default to SHA-1
/// and will reject these signatures until switched).
#[derive(Debug, Clone)]
pub struct CloudinaryAssetStore {
    client: reqwest::Client,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

/// Successful upload response (fields we consume).
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

/// Destroy response: `result` is `"ok"` or `"not found"`.
#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

/// Error envelope returned on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl CloudinaryAssetStore {
    /// Create a new Cloudinary provider from configuration.
    pub fn new(config: &AssetStoreConfig) -> AppResult<Self> {
        let CloudinaryConfig {
            cloud_name,
            api_key,
            api_secret,
        } = &config.cloudinary;

        if cloud_name.is_empty() || api_key.is_empty() || api_secret.is_empty() {
            return Err(AppError::configuration(
                "Cloudinary provider requires cloud_name, api_key, and api_secret",
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::configuration(format!("Failed to build asset host client: {e}"))
            })?;

        Ok(Self {
            client,
            cloud_name: cloud_name.clone(),
            api_key: api_key.clone(),
            api_secret: api_secret.clone(),
        })
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{API_BASE}/{}/image/{action}", self.cloud_name)
    }

    /// Sign a request: SHA-256 over the sorted parameter string plus the
    /// API secret, hex-encoded.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(string_to_sign(params).as_bytes());
        hasher.update(self.api_secret.as_bytes());
        hex_encode(&hasher.finalize())
    }

    /// Turn a non-2xx response into an `ExternalService` error carrying the
    /// host's status and message.
    async fn upstream_error(response: reqwest::Response) -> AppError {
        let status = response.status();
        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error.message,
            Err(_) => "Asset host returned an unreadable error".to_string(),
        };
        AppError::external_service(format!("Asset host error ({status}): {message}"))
    }
}

#[async_trait]
impl AssetStore for CloudinaryAssetStore {
    fn provider_type(&self) -> &str {
        "cloudinary"
    }

    async fn health_check(&self) -> AppResult<bool> {
        let url = format!("{API_BASE}/{}/ping", self.cloud_name);
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Asset host unreachable: {e}")))?;
        Ok(response.status().is_success())
    }

    async fn store(&self, data: Bytes, namespace: &str, filename: &str) -> AppResult<StoredAsset> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = self.sign(&[("folder", namespace), ("timestamp", &timestamp)]);

        let part = reqwest::multipart::Part::bytes(data.to_vec()).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", namespace.to_string())
            .text("signature", signature)
            .part("file", part);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Asset upload failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::external_service(format!("Malformed upload response: {e}")))?;

        debug!(public_id = %body.public_id, "Asset stored on Cloudinary");

        Ok(StoredAsset {
            url: body.secure_url,
            public_id: body.public_id,
        })
    }

    async fn remove(&self, public_id: &str) -> AppResult<RemoveOutcome> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = self.sign(&[("public_id", public_id), ("timestamp", &timestamp)]);

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .form(&[
                ("public_id", public_id),
                ("api_key", &self.api_key),
                ("timestamp", &timestamp),
                ("signature", &signature),
            ])
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Asset delete failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let body: DestroyResponse = response
            .json()
            .await
            .map_err(|e| AppError::external_service(format!("Malformed destroy response: {e}")))?;

        match body.result.as_str() {
            "ok" => Ok(RemoveOutcome::Removed),
            "not found" => Ok(RemoveOutcome::AlreadyGone),
            other => Err(AppError::external_service(format!(
                "Unexpected destroy result: {other}"
            ))),
        }
    }
}

/// Sorted `key=value` parameter string the signature covers.
fn string_to_sign(params: &[(&str, &str)]) -> String {
    let mut sorted: Vec<_> = params.to_vec();
    sorted.sort_by_key(|(k, _)| *k);
    sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_to_sign_sorts_params() {
        let s = string_to_sign(&[("timestamp", "173"), ("folder", "users/u1")]);
        assert_eq!(s, "folder=users/u1&timestamp=173");
    }

    #[test]
    fn signature_is_hex_sha256_and_secret_dependent() {
        let config = AssetStoreConfig {
            cloudinary: CloudinaryConfig {
                cloud_name: "demo".into(),
                api_key: "key".into(),
                api_secret: "secret".into(),
            },
            ..AssetStoreConfig::default()
        };
        let store = CloudinaryAssetStore::new(&config).unwrap();
        let sig = store.sign(&[("timestamp", "173")]);
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));

        let mut other = config.clone();
        other.cloudinary.api_secret = "different".into();
        let other_store = CloudinaryAssetStore::new(&other).unwrap();
        assert_ne!(sig, other_store.sign(&[("timestamp", "173")]));
    }

    #[test]
    fn new_rejects_missing_credentials() {
        let config = AssetStoreConfig::default();
        assert!(CloudinaryAssetStore::new(&config).is_err());
    }
}

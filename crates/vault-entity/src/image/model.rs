//! Image entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An image record. The binary itself lives on the asset host; this row is
/// the source of truth for the user-visible state.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Image {
    /// Unique image identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Durable URL on the asset host. Immutable after creation.
    pub url: String,
    /// Opaque deletion handle on the asset host. Immutable after creation.
    pub public_id: Option<String>,
    /// Containing folder, if any. May dangle after a folder deletion.
    pub folder_id: Option<Uuid>,
    /// The image owner. Immutable after creation.
    pub owner_id: Uuid,
    /// When the image was uploaded.
    pub created_at: DateTime<Utc>,
    /// When the image was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new image record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateImage {
    /// Display name (already validated and trimmed).
    pub name: String,
    /// Durable URL returned by the asset host.
    pub url: String,
    /// Deletion handle returned by the asset host.
    pub public_id: Option<String>,
    /// Containing folder, if any.
    pub folder_id: Option<Uuid>,
    /// The image owner.
    pub owner_id: Uuid,
}

/// Allow-listed patch for an existing image.
///
/// Only `name` and `folder_id` are mutable; `url`, `public_id`, and
/// `owner_id` are fixed at creation. `Some(None)` on `folder_id` moves the
/// image out of its folder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateImage {
    /// New display name.
    pub name: Option<String>,
    /// New folder reference.
    pub folder_id: Option<Option<Uuid>>,
}

impl UpdateImage {
    /// Whether the patch changes anything at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.folder_id.is_none()
    }
}

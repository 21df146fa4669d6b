//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A folder in a user's image hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
    /// Parent folder ID (null for root folders). May dangle: deleting a
    /// folder never touches its children.
    pub parent_id: Option<Uuid>,
    /// The folder owner. Immutable after creation.
    pub owner_id: Uuid,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name (already validated and trimmed).
    pub name: String,
    /// Parent folder (None for root).
    pub parent_id: Option<Uuid>,
    /// The folder owner.
    pub owner_id: Uuid,
}

/// Allow-listed patch for an existing folder.
///
/// `None` on the outer option means "leave unchanged"; `Some(None)` on
/// `parent_id` detaches the folder to root. Only `name` and `parent_id`
/// are mutable through updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFolder {
    /// New folder name.
    pub name: Option<String>,
    /// New parent reference.
    pub parent_id: Option<Option<Uuid>>,
}

impl UpdateFolder {
    /// Whether the patch changes anything at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.parent_id.is_none()
    }
}

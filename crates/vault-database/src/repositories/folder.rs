//! Folder repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;
use vault_entity::folder::{CreateFolder, Folder};

/// Folder persistence operations.
///
/// Reads come in two flavors: owner-scoped (`find_by_id_and_owner`,
/// `find_by_owner`) where another user's folder is indistinguishable from a
/// missing one, and raw (`find_by_id`) used by update/delete paths that need
/// to tell "absent" apart from "wrong owner".
#[async_trait]
pub trait FolderRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find a folder by ID, regardless of owner.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>>;

    /// Find a folder by ID, scoped to its owner.
    async fn find_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Folder>>;

    /// List all folders owned by a user, newest first.
    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Folder>>;

    /// Create a new folder.
    async fn create(&self, data: &CreateFolder) -> AppResult<Folder>;

    /// Persist the mutable fields (name, parent) of a folder.
    async fn update(&self, folder: &Folder) -> AppResult<Folder>;

    /// Delete a folder row. Children and contained images are deliberately
    /// left untouched (no cascade).
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// PostgreSQL-backed [`FolderRepository`].
#[derive(Debug, Clone)]
pub struct PgFolderRepository {
    pool: PgPool,
}

impl PgFolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderRepository for PgFolderRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn find_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE owner_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (name, parent_id, owner_id) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.parent_id)
        .bind(data.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create folder", e))
    }

    async fn update(&self, folder: &Folder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = $2, parent_id = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(folder.id)
        .bind(&folder.name)
        .bind(folder.parent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update folder", e))?
        .ok_or_else(|| AppError::not_found(format!("Folder {} not found", folder.id)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}

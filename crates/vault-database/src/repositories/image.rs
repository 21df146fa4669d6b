//! Image repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;
use vault_entity::image::{CreateImage, Image};

/// Image persistence operations, including owner-scoped projections.
#[async_trait]
pub trait ImageRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find an image by ID, regardless of owner.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Image>>;

    /// Find an image by ID, scoped to its owner.
    async fn find_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Image>>;

    /// List the most recently uploaded images for a user, newest first,
    /// id as tiebreak.
    async fn find_recent_by_owner(&self, owner_id: Uuid, limit: i64) -> AppResult<Vec<Image>>;

    /// List all images of a user inside one folder, newest first.
    async fn find_by_folder_and_owner(
        &self,
        folder_id: Uuid,
        owner_id: Uuid,
    ) -> AppResult<Vec<Image>>;

    /// Case-insensitive substring search over a user's image names.
    async fn search_by_name(&self, owner_id: Uuid, query: &str) -> AppResult<Vec<Image>>;

    /// Create a new image record.
    async fn create(&self, data: &CreateImage) -> AppResult<Image>;

    /// Persist the mutable fields (name, folder) of an image. The url,
    /// deletion handle, and owner are fixed at creation.
    async fn update(&self, image: &Image) -> AppResult<Image>;

    /// Delete an image row.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// PostgreSQL-backed [`ImageRepository`].
#[derive(Debug, Clone)]
pub struct PgImageRepository {
    pool: PgPool,
}

impl PgImageRepository {
    /// Create a new image repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageRepository for PgImageRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Image>> {
        sqlx::query_as::<_, Image>("SELECT * FROM images WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find image", e))
    }

    async fn find_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Image>> {
        sqlx::query_as::<_, Image>("SELECT * FROM images WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find image", e))
    }

    async fn find_recent_by_owner(&self, owner_id: Uuid, limit: i64) -> AppResult<Vec<Image>> {
        sqlx::query_as::<_, Image>(
            "SELECT * FROM images WHERE owner_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2",
        )
        .bind(owner_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list images", e))
    }

    async fn find_by_folder_and_owner(
        &self,
        folder_id: Uuid,
        owner_id: Uuid,
    ) -> AppResult<Vec<Image>> {
        sqlx::query_as::<_, Image>(
            "SELECT * FROM images WHERE folder_id = $1 AND owner_id = $2 \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(folder_id)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list folder images", e)
        })
    }

    async fn search_by_name(&self, owner_id: Uuid, query: &str) -> AppResult<Vec<Image>> {
        let pattern = format!("%{}%", escape_like(query));
        sqlx::query_as::<_, Image>(
            "SELECT * FROM images WHERE owner_id = $1 AND name ILIKE $2 ESCAPE '\\' \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(owner_id)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search images", e))
    }

    async fn create(&self, data: &CreateImage) -> AppResult<Image> {
        sqlx::query_as::<_, Image>(
            "INSERT INTO images (name, url, public_id, folder_id, owner_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.url)
        .bind(&data.public_id)
        .bind(data.folder_id)
        .bind(data.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create image", e))
    }

    async fn update(&self, image: &Image) -> AppResult<Image> {
        sqlx::query_as::<_, Image>(
            "UPDATE images SET name = $2, folder_id = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(image.id)
        .bind(&image.name)
        .bind(image.folder_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update image", e))?
        .ok_or_else(|| AppError::not_found(format!("Image {} not found", image.id)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete image", e))?;
        Ok(result.rows_affected() > 0)
    }
}

/// Escape LIKE metacharacters so user input matches literally.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_passes_plain_text_through() {
        assert_eq!(escape_like("vacation"), "vacation");
    }

    #[test]
    fn escape_like_escapes_metacharacters() {
        assert_eq!(escape_like("100%_done"), "100\\%\\_done");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }
}

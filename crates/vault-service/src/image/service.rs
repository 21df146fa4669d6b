//! Image lifecycle: upload, browse, rename/move, search, delete.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use vault_core::config::ReferencesConfig;
use vault_core::error::AppError;
use vault_core::traits::AssetStore;
use vault_database::repositories::folder::FolderRepository;
use vault_database::repositories::image::ImageRepository;
use vault_entity::image::{CreateImage, Image, UpdateImage};
use vault_entity::name::validate_entity_name;

use crate::context::RequestContext;
use crate::ownership::ensure_owner;

/// How many images the recent-uploads listing returns.
const RECENT_UPLOADS_LIMIT: i64 = 8;

/// Manages image records and the assets behind them.
#[derive(Debug, Clone)]
pub struct ImageService {
    /// Image repository.
    image_repo: Arc<dyn ImageRepository>,
    /// Folder repository, for strict folder reference checks.
    folder_repo: Arc<dyn FolderRepository>,
    /// Asset host the binaries live on.
    asset_store: Arc<dyn AssetStore>,
    /// Reference validation policies.
    references: ReferencesConfig,
}

/// Request to upload a new image.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Raw image bytes.
    pub data: Bytes,
    /// Original filename from the multipart part.
    pub filename: String,
    /// Optional display name; falls back to the filename stem.
    pub name: Option<String>,
    /// Optional containing folder.
    pub folder_id: Option<Uuid>,
}

impl ImageService {
    /// Creates a new image service.
    pub fn new(
        image_repo: Arc<dyn ImageRepository>,
        folder_repo: Arc<dyn FolderRepository>,
        asset_store: Arc<dyn AssetStore>,
        references: ReferencesConfig,
    ) -> Self {
        Self {
            image_repo,
            folder_repo,
            asset_store,
            references,
        }
    }

    /// Lists the caller's most recent uploads, newest first.
    pub async fn list_recent(&self, ctx: &RequestContext) -> Result<Vec<Image>, AppError> {
        self.image_repo
            .find_recent_by_owner(ctx.user_id, RECENT_UPLOADS_LIMIT)
            .await
    }

    /// Lists the caller's images inside a folder, newest first.
    pub async fn list_in_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> Result<Vec<Image>, AppError> {
        self.image_repo
            .find_by_folder_and_owner(folder_id, ctx.user_id)
            .await
    }

    /// Gets an image by ID. Owner-scoped: someone else's image is reported
    /// as missing.
    pub async fn get_image(&self, ctx: &RequestContext, image_id: Uuid) -> Result<Image, AppError> {
        self.image_repo
            .find_by_id_and_owner(image_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Image not found"))
    }

    /// Uploads an image: the bytes go to the asset host first, and only a
    /// successful store produces a database record.
    pub async fn upload(&self, ctx: &RequestContext, req: UploadRequest) -> Result<Image, AppError> {
        if req.data.is_empty() {
            return Err(AppError::validation("Please upload a file"));
        }

        if let Some(folder_id) = req.folder_id {
            self.check_folder_reference(ctx, folder_id).await?;
        }

        let name = validate_entity_name(&display_name(&req), "Image")?;

        let namespace = format!("users/{}", ctx.user_id);
        let stored = self
            .asset_store
            .store(req.data, &namespace, &req.filename)
            .await?;

        let image = self
            .image_repo
            .create(&CreateImage {
                name,
                url: stored.url,
                public_id: Some(stored.public_id),
                folder_id: req.folder_id,
                owner_id: ctx.user_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            image_id = %image.id,
            name = %image.name,
            "Image uploaded"
        );

        Ok(image)
    }

    /// Applies an allow-listed patch to an image. Never touches the asset
    /// host: renames and moves are metadata-only.
    pub async fn update_image(
        &self,
        ctx: &RequestContext,
        image_id: Uuid,
        patch: UpdateImage,
    ) -> Result<Image, AppError> {
        let mut image = self
            .image_repo
            .find_by_id(image_id)
            .await?
            .ok_or_else(|| AppError::not_found("Image not found"))?;
        ensure_owner(image.owner_id, ctx.user_id)?;

        if patch.is_empty() {
            return Ok(image);
        }

        if let Some(name) = patch.name {
            image.name = validate_entity_name(&name, "Image")?;
        }
        if let Some(folder_id) = patch.folder_id {
            if let Some(new_folder) = folder_id {
                self.check_folder_reference(ctx, new_folder).await?;
            }
            image.folder_id = folder_id;
        }
        image.updated_at = Utc::now();

        let image = self.image_repo.update(&image).await?;

        info!(user_id = %ctx.user_id, image_id = %image_id, "Image updated");

        Ok(image)
    }

    /// Deletes an image record after a best-effort removal of the remote
    /// asset. The asset host being down never blocks the delete; the row is
    /// the source of truth.
    pub async fn delete_image(&self, ctx: &RequestContext, image_id: Uuid) -> Result<(), AppError> {
        let image = self
            .image_repo
            .find_by_id(image_id)
            .await?
            .ok_or_else(|| AppError::not_found("Image not found"))?;
        ensure_owner(image.owner_id, ctx.user_id)?;

        if let Some(public_id) = &image.public_id {
            if let Err(e) = self.asset_store.remove(public_id).await {
                warn!(
                    image_id = %image_id,
                    public_id = %public_id,
                    error = %e,
                    "Remote asset removal failed; deleting record anyway"
                );
            }
        }

        self.image_repo.delete(image_id).await?;

        info!(user_id = %ctx.user_id, image_id = %image_id, "Image deleted");

        Ok(())
    }

    /// Case-insensitive substring search over the caller's image names,
    /// newest first.
    pub async fn search(&self, ctx: &RequestContext, query: &str) -> Result<Vec<Image>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::validation("Search query cannot be empty"));
        }
        self.image_repo.search_by_name(ctx.user_id, query).await
    }

    /// Validates a folder reference according to the configured policy.
    async fn check_folder_reference(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> Result<(), AppError> {
        if !self.references.image_folder.is_strict() {
            return Ok(());
        }
        self.folder_repo
            .find_by_id_and_owner(folder_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;
        Ok(())
    }
}

/// Picks the display name for an upload: the client-supplied name when it
/// has any content, otherwise the filename without its extension.
fn display_name(req: &UploadRequest) -> String {
    if let Some(name) = &req.name {
        if !name.trim().is_empty() {
            return name.clone();
        }
    }
    filename_stem(&req.filename).to_string()
}

/// The filename with a trailing extension stripped. Dotfiles and bare names
/// pass through unchanged.
fn filename_stem(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => filename,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{DateTime, Duration};

    use vault_core::error::ErrorKind;
    use vault_core::result::AppResult;
    use vault_core::traits::{RemoveOutcome, StoredAsset};
    use vault_entity::folder::{CreateFolder, Folder};

    #[derive(Debug, Default)]
    struct InMemoryImages {
        rows: Mutex<Vec<Image>>,
    }

    #[async_trait]
    impl ImageRepository for InMemoryImages {
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Image>> {
            Ok(self.rows.lock().unwrap().iter().find(|i| i.id == id).cloned())
        }

        async fn find_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Image>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|i| i.id == id && i.owner_id == owner_id)
                .cloned())
        }

        async fn find_recent_by_owner(&self, owner_id: Uuid, limit: i64) -> AppResult<Vec<Image>> {
            let mut rows: Vec<Image> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|i| i.owner_id == owner_id)
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            rows.truncate(limit as usize);
            Ok(rows)
        }

        async fn find_by_folder_and_owner(
            &self,
            folder_id: Uuid,
            owner_id: Uuid,
        ) -> AppResult<Vec<Image>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|i| i.folder_id == Some(folder_id) && i.owner_id == owner_id)
                .cloned()
                .collect())
        }

        async fn search_by_name(&self, owner_id: Uuid, query: &str) -> AppResult<Vec<Image>> {
            let needle = query.to_lowercase();
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|i| i.owner_id == owner_id && i.name.to_lowercase().contains(&needle))
                .cloned()
                .collect())
        }

        async fn create(&self, data: &CreateImage) -> AppResult<Image> {
            let now = Utc::now();
            let image = Image {
                id: Uuid::new_v4(),
                name: data.name.clone(),
                url: data.url.clone(),
                public_id: data.public_id.clone(),
                folder_id: data.folder_id,
                owner_id: data.owner_id,
                created_at: now,
                updated_at: now,
            };
            self.rows.lock().unwrap().push(image.clone());
            Ok(image)
        }

        async fn update(&self, image: &Image) -> AppResult<Image> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|i| i.id == image.id)
                .ok_or_else(|| AppError::not_found("Image not found"))?;
            *row = image.clone();
            Ok(image.clone())
        }

        async fn delete(&self, id: Uuid) -> AppResult<bool> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|i| i.id != id);
            Ok(rows.len() < before)
        }
    }

    #[derive(Debug, Default)]
    struct InMemoryFolders {
        rows: Mutex<Vec<Folder>>,
    }

    #[async_trait]
    impl FolderRepository for InMemoryFolders {
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
            Ok(self.rows.lock().unwrap().iter().find(|f| f.id == id).cloned())
        }

        async fn find_by_id_and_owner(
            &self,
            id: Uuid,
            owner_id: Uuid,
        ) -> AppResult<Option<Folder>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|f| f.id == id && f.owner_id == owner_id)
                .cloned())
        }

        async fn find_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Folder>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|f| f.owner_id == owner_id)
                .cloned()
                .collect())
        }

        async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
            let now = Utc::now();
            let folder = Folder {
                id: Uuid::new_v4(),
                name: data.name.clone(),
                parent_id: data.parent_id,
                owner_id: data.owner_id,
                created_at: now,
                updated_at: now,
            };
            self.rows.lock().unwrap().push(folder.clone());
            Ok(folder)
        }

        async fn update(&self, folder: &Folder) -> AppResult<Folder> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|f| f.id == folder.id)
                .ok_or_else(|| AppError::not_found("Folder not found"))?;
            *row = folder.clone();
            Ok(folder.clone())
        }

        async fn delete(&self, id: Uuid) -> AppResult<bool> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|f| f.id != id);
            Ok(rows.len() < before)
        }
    }

    #[derive(Debug, Default)]
    struct FakeAssetStore {
        fail_store: bool,
        fail_remove: bool,
        removed: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AssetStore for FakeAssetStore {
        fn provider_type(&self) -> &str {
            "memory"
        }

        async fn health_check(&self) -> AppResult<bool> {
            Ok(true)
        }

        async fn store(
            &self,
            _data: Bytes,
            namespace: &str,
            filename: &str,
        ) -> AppResult<StoredAsset> {
            if self.fail_store {
                return Err(AppError::external_service("Asset host unavailable"));
            }
            Ok(StoredAsset {
                url: format!("https://assets.test/{namespace}/{filename}"),
                public_id: format!("{namespace}/{filename}"),
            })
        }

        async fn remove(&self, public_id: &str) -> AppResult<RemoveOutcome> {
            if self.fail_remove {
                return Err(AppError::external_service("Asset host unavailable"));
            }
            self.removed.lock().unwrap().push(public_id.to_string());
            Ok(RemoveOutcome::Removed)
        }
    }

    fn ctx() -> RequestContext {
        RequestContext::new(Uuid::new_v4(), "ansel".to_string())
    }

    fn service(
        images: &Arc<InMemoryImages>,
        folders: &Arc<InMemoryFolders>,
        store: &Arc<FakeAssetStore>,
    ) -> ImageService {
        ImageService::new(
            Arc::clone(images) as Arc<dyn ImageRepository>,
            Arc::clone(folders) as Arc<dyn FolderRepository>,
            Arc::clone(store) as Arc<dyn AssetStore>,
            ReferencesConfig::default(),
        )
    }

    fn seeded_image(owner_id: Uuid, name: &str, uploaded_at: DateTime<Utc>) -> Image {
        Image {
            id: Uuid::new_v4(),
            name: name.to_string(),
            url: format!("https://assets.test/users/{owner_id}/{name}"),
            public_id: Some(format!("users/{owner_id}/{name}")),
            folder_id: None,
            owner_id,
            created_at: uploaded_at,
            updated_at: uploaded_at,
        }
    }

    fn upload(name: Option<&str>, filename: &str) -> UploadRequest {
        UploadRequest {
            data: Bytes::from_static(b"fake image bytes"),
            filename: filename.to_string(),
            name: name.map(String::from),
            folder_id: None,
        }
    }

    #[test]
    fn explicit_name_wins() {
        assert_eq!(display_name(&upload(Some("Sunset"), "IMG_0001.jpg")), "Sunset");
    }

    #[test]
    fn blank_name_falls_back_to_filename_stem() {
        assert_eq!(display_name(&upload(Some("   "), "IMG_0001.jpg")), "IMG_0001");
        assert_eq!(display_name(&upload(None, "IMG_0001.jpg")), "IMG_0001");
    }

    #[test]
    fn stem_handles_odd_filenames() {
        assert_eq!(filename_stem("archive.tar.gz"), "archive.tar");
        assert_eq!(filename_stem(".hidden"), ".hidden");
        assert_eq!(filename_stem("no-extension"), "no-extension");
    }

    #[tokio::test]
    async fn upload_stores_then_records() {
        let ctx = ctx();
        let images = Arc::new(InMemoryImages::default());
        let store = Arc::new(FakeAssetStore::default());
        let svc = service(&images, &Arc::new(InMemoryFolders::default()), &store);

        let image = svc.upload(&ctx, upload(None, "IMG_0001.jpg")).await.unwrap();

        assert_eq!(image.name, "IMG_0001");
        assert_eq!(
            image.url,
            format!("https://assets.test/users/{}/IMG_0001.jpg", ctx.user_id)
        );
        assert_eq!(images.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_upload_persists_nothing() {
        let ctx = ctx();
        let images = Arc::new(InMemoryImages::default());
        let store = Arc::new(FakeAssetStore {
            fail_store: true,
            ..Default::default()
        });
        let svc = service(&images, &Arc::new(InMemoryFolders::default()), &store);

        let err = svc.upload(&ctx, upload(None, "IMG_0001.jpg")).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::ExternalService);
        assert!(images.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn upload_into_missing_folder_is_rejected() {
        let ctx = ctx();
        let images = Arc::new(InMemoryImages::default());
        let store = Arc::new(FakeAssetStore::default());
        let svc = service(&images, &Arc::new(InMemoryFolders::default()), &store);

        let mut req = upload(None, "IMG_0001.jpg");
        req.folder_id = Some(Uuid::new_v4());
        let err = svc.upload(&ctx, req).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(images.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_row_even_when_asset_host_fails() {
        let ctx = ctx();
        let images = Arc::new(InMemoryImages::default());
        let image = seeded_image(ctx.user_id, "sunset", Utc::now());
        let image_id = image.id;
        images.rows.lock().unwrap().push(image);

        let store = Arc::new(FakeAssetStore {
            fail_remove: true,
            ..Default::default()
        });
        let svc = service(&images, &Arc::new(InMemoryFolders::default()), &store);

        svc.delete_image(&ctx, image_id).await.unwrap();

        assert!(images.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_the_remote_asset_on_the_happy_path() {
        let ctx = ctx();
        let images = Arc::new(InMemoryImages::default());
        let image = seeded_image(ctx.user_id, "sunset", Utc::now());
        let image_id = image.id;
        let public_id = image.public_id.clone().unwrap();
        images.rows.lock().unwrap().push(image);

        let store = Arc::new(FakeAssetStore::default());
        let svc = service(&images, &Arc::new(InMemoryFolders::default()), &store);

        svc.delete_image(&ctx, image_id).await.unwrap();

        assert_eq!(*store.removed.lock().unwrap(), vec![public_id]);
        assert!(images.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn foreign_images_look_missing_on_reads() {
        let owner = Uuid::new_v4();
        let images = Arc::new(InMemoryImages::default());
        let image = seeded_image(owner, "sunset", Utc::now());
        let image_id = image.id;
        images.rows.lock().unwrap().push(image);

        let store = Arc::new(FakeAssetStore::default());
        let svc = service(&images, &Arc::new(InMemoryFolders::default()), &store);

        let err = svc.get_image(&ctx(), image_id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn foreign_images_are_forbidden_on_mutation() {
        let owner = Uuid::new_v4();
        let images = Arc::new(InMemoryImages::default());
        let image = seeded_image(owner, "sunset", Utc::now());
        let image_id = image.id;
        images.rows.lock().unwrap().push(image);

        let store = Arc::new(FakeAssetStore::default());
        let svc = service(&images, &Arc::new(InMemoryFolders::default()), &store);
        let intruder = ctx();

        let patch = UpdateImage {
            name: Some("mine now".to_string()),
            folder_id: None,
        };
        let err = svc.update_image(&intruder, image_id, patch).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let err = svc.delete_image(&intruder, image_id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        assert_eq!(images.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn recent_listing_is_newest_first_and_capped() {
        let ctx = ctx();
        let images = Arc::new(InMemoryImages::default());
        let base = Utc::now();
        for i in 0..10 {
            images.rows.lock().unwrap().push(seeded_image(
                ctx.user_id,
                &format!("img-{i}"),
                base + Duration::seconds(i),
            ));
        }

        let store = Arc::new(FakeAssetStore::default());
        let svc = service(&images, &Arc::new(InMemoryFolders::default()), &store);

        let recent = svc.list_recent(&ctx).await.unwrap();
        assert_eq!(recent.len(), 8);
        assert_eq!(recent[0].name, "img-9");
        assert_eq!(recent[7].name, "img-2");
    }
}

//! Folder CRUD operations with owner scoping.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use vault_core::config::ReferencesConfig;
use vault_core::error::AppError;
use vault_database::repositories::folder::FolderRepository;
use vault_entity::folder::{CreateFolder, Folder, UpdateFolder};
use vault_entity::name::validate_entity_name;

use crate::context::RequestContext;
use crate::ownership::ensure_owner;

/// Manages folder CRUD operations.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder repository.
    folder_repo: Arc<dyn FolderRepository>,
    /// Reference validation policies.
    references: ReferencesConfig,
}

/// Request to create a new folder.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Parent folder ID (None for root-level).
    pub parent_id: Option<Uuid>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(folder_repo: Arc<dyn FolderRepository>, references: ReferencesConfig) -> Self {
        Self {
            folder_repo,
            references,
        }
    }

    /// Lists every folder owned by the caller, newest first.
    pub async fn list_folders(&self, ctx: &RequestContext) -> Result<Vec<Folder>, AppError> {
        self.folder_repo.find_by_owner(ctx.user_id).await
    }

    /// Gets a folder by ID.
    ///
    /// The lookup is owner-scoped, so a folder belonging to someone else is
    /// reported as missing.
    pub async fn get_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> Result<Folder, AppError> {
        self.folder_repo
            .find_by_id_and_owner(folder_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Creates a new folder.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> Result<Folder, AppError> {
        let name = validate_entity_name(&req.name, "Folder")?;

        if let Some(parent_id) = req.parent_id {
            self.check_parent_reference(ctx, parent_id).await?;
        }

        let folder = self
            .folder_repo
            .create(&CreateFolder {
                name,
                parent_id: req.parent_id,
                owner_id: ctx.user_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            name = %folder.name,
            "Folder created"
        );

        Ok(folder)
    }

    /// Applies an allow-listed patch to a folder.
    ///
    /// Fetches by raw id first so the caller can tell a missing folder (404)
    /// apart from someone else's (403).
    pub async fn update_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        patch: UpdateFolder,
    ) -> Result<Folder, AppError> {
        let mut folder = self
            .folder_repo
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;
        ensure_owner(folder.owner_id, ctx.user_id)?;

        if patch.is_empty() {
            return Ok(folder);
        }

        if let Some(name) = patch.name {
            folder.name = validate_entity_name(&name, "Folder")?;
        }
        if let Some(parent_id) = patch.parent_id {
            if let Some(new_parent) = parent_id {
                self.check_parent_reference(ctx, new_parent).await?;
            }
            folder.parent_id = parent_id;
        }
        folder.updated_at = Utc::now();

        let folder = self.folder_repo.update(&folder).await?;

        info!(user_id = %ctx.user_id, folder_id = %folder_id, "Folder updated");

        Ok(folder)
    }

    /// Deletes a folder row.
    ///
    /// Children and contained images are left alone; their references to
    /// this folder simply dangle.
    pub async fn delete_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> Result<(), AppError> {
        let folder = self
            .folder_repo
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;
        ensure_owner(folder.owner_id, ctx.user_id)?;

        self.folder_repo.delete(folder_id).await?;

        info!(user_id = %ctx.user_id, folder_id = %folder_id, "Folder deleted");

        Ok(())
    }

    /// Validates a parent reference according to the configured policy.
    async fn check_parent_reference(
        &self,
        ctx: &RequestContext,
        parent_id: Uuid,
    ) -> Result<(), AppError> {
        if !self.references.folder_parent.is_strict() {
            return Ok(());
        }
        self.folder_repo
            .find_by_id_and_owner(parent_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Parent folder not found"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;

    use vault_core::config::ReferencePolicy;
    use vault_core::error::ErrorKind;
    use vault_core::result::AppResult;

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

    fn ctx() -> RequestContext {
        RequestContext::new(Uuid::new_v4(), "ansel".to_string())
    }

    fn service(folders: &Arc<InMemoryFolders>, references: ReferencesConfig) -> FolderService {
        FolderService::new(
            Arc::clone(folders) as Arc<dyn FolderRepository>,
            references,
        )
    }

    #[tokio::test]
    async fn foreign_folders_look_missing_on_reads() {
        let owner = ctx();
        let folders = Arc::new(InMemoryFolders::default());
        let svc = service(&folders, ReferencesConfig::default());
        let folder = svc
            .create_folder(
                &owner,
                CreateFolderRequest {
                    name: "Trips".to_string(),
                    parent_id: None,
                },
            )
            .await
            .unwrap();

        let err = svc.get_folder(&ctx(), folder.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn foreign_folders_are_forbidden_on_mutation() {
        let owner = ctx();
        let folders = Arc::new(InMemoryFolders::default());
        let svc = service(&folders, ReferencesConfig::default());
        let folder = svc
            .create_folder(
                &owner,
                CreateFolderRequest {
                    name: "Trips".to_string(),
                    parent_id: None,
                },
            )
            .await
            .unwrap();

        let intruder = ctx();
        let patch = UpdateFolder {
            name: Some("Stolen".to_string()),
            parent_id: None,
        };
        let err = svc.update_folder(&intruder, folder.id, patch).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let err = svc.delete_folder(&intruder, folder.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        assert_eq!(folders.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn permissive_parent_policy_stores_dangling_references() {
        let owner = ctx();
        let folders = Arc::new(InMemoryFolders::default());
        let svc = service(&folders, ReferencesConfig::default());

        let dangling = Uuid::new_v4();
        let folder = svc
            .create_folder(
                &owner,
                CreateFolderRequest {
                    name: "Trips".to_string(),
                    parent_id: Some(dangling),
                },
            )
            .await
            .unwrap();

        assert_eq!(folder.parent_id, Some(dangling));
    }

    #[tokio::test]
    async fn strict_parent_policy_rejects_missing_parents() {
        let owner = ctx();
        let folders = Arc::new(InMemoryFolders::default());
        let references = ReferencesConfig {
            folder_parent: ReferencePolicy::Strict,
            ..ReferencesConfig::default()
        };
        let svc = service(&folders, references);

        let err = svc
            .create_folder(
                &owner,
                CreateFolderRequest {
                    name: "Trips".to_string(),
                    parent_id: Some(Uuid::new_v4()),
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(folders.rows.lock().unwrap().is_empty());
    }
}

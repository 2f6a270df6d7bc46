//! Folder create, rename and delete.

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::info;

use tabber_core::config::TreeConfig;
use tabber_core::error::AppError;
use tabber_core::result::AppResult;
use tabber_core::types::{FolderId, NodePath, validate_name};
use tabber_database::TreeStore;
use tabber_entity::{CreateFolder, Folder};

use crate::context::RequestContext;
use crate::resolver::PathResolver;

/// Manages folder mutations inside the caller's tree.
#[derive(Clone)]
pub struct FolderService {
    /// Store handle.
    store: Arc<dyn TreeStore>,
    /// Path resolver over the same store.
    resolver: PathResolver,
    /// Delete policy.
    config: TreeConfig,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(store: Arc<dyn TreeStore>, config: TreeConfig) -> Self {
        Self {
            resolver: PathResolver::new(Arc::clone(&store)),
            store,
            config,
        }
    }

    /// Creates an empty folder at `path`.
    ///
    /// Every ancestor must already exist. Fails with `AlreadyExists` if a
    /// folder or conversation already uses the final segment's name.
    pub async fn add_folder(&self, ctx: &RequestContext, path: &NodePath) -> AppResult<Folder> {
        let (parent_id, name) = self.resolver.resolve_parent(ctx.root_folder_id, path).await?;

        let folder = self
            .store
            .insert_folder(&CreateFolder {
                parent_id,
                name: name.to_string(),
                owner_id: ctx.user_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            path = %path,
            "Folder created"
        );
        Ok(folder)
    }

    /// Renames the folder at `path`, keeping its id and contents.
    pub async fn rename_folder(
        &self,
        ctx: &RequestContext,
        path: &NodePath,
        new_name: &str,
    ) -> AppResult<Folder> {
        validate_name(new_name)?;
        if path.is_root() {
            return Err(AppError::forbidden("The root folder cannot be renamed"));
        }

        let folder = self.resolver.resolve_folder(ctx.root_folder_id, path).await?;
        if folder.name == new_name {
            return Ok(folder);
        }

        let renamed = self.store.rename_folder(folder.id, new_name).await?;
        info!(
            user_id = %ctx.user_id,
            folder_id = %renamed.id,
            from = %path,
            to = %new_name,
            "Folder renamed"
        );
        Ok(renamed)
    }

    /// Deletes the folder at `path`.
    ///
    /// With `cascade_delete` the whole subtree goes, deepest nodes first,
    /// so an interruption leaves a smaller but fully linked tree. Without
    /// it a populated folder fails with `NotEmpty`. The root is never
    /// deleted.
    pub async fn delete_folder(&self, ctx: &RequestContext, path: &NodePath) -> AppResult<()> {
        if path.is_root() {
            return Err(AppError::forbidden("The root folder cannot be deleted"));
        }

        let folder = self.resolver.resolve_folder(ctx.root_folder_id, path).await?;

        // Without cascade the store's own emptiness check decides, so a
        // child added after resolution still fails the delete.
        let removed = if self.config.cascade_delete {
            self.delete_subtree(folder.id).await?
        } else {
            u64::from(self.store.delete_folder(folder.id).await?)
        };
        if removed == 0 {
            return Err(AppError::not_found(format!("'{path}' not found")));
        }

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            path = %path,
            removed,
            "Folder deleted"
        );
        Ok(())
    }

    /// Removes a folder and everything below it. Returns the number of
    /// records deleted.
    fn delete_subtree(&self, id: FolderId) -> BoxFuture<'_, AppResult<u64>> {
        Box::pin(async move {
            // Re-read so nodes added since resolution are included.
            let Some(folder) = self.store.find_folder(id).await? else {
                return Ok(0);
            };

            let mut removed = 0;
            for conversation_id in &folder.conversations {
                if self.store.delete_conversation(*conversation_id).await? {
                    removed += 1;
                }
            }
            for child_id in &folder.children {
                removed += self.delete_subtree(*child_id).await?;
            }
            if self.store.delete_folder(id).await? {
                removed += 1;
            }
            Ok(removed)
        })
    }
}

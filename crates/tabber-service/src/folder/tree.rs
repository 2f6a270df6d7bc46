//! Whole-tree serialization and the flat folder listing.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::warn;

use tabber_core::error::AppError;
use tabber_core::result::AppResult;
use tabber_core::types::FolderId;
use tabber_database::TreeStore;
use tabber_entity::{ContentTree, Folder, FolderNode};

use crate::context::RequestContext;

/// Builds the nested content tree and folder listings.
///
/// Children are visited in the order their parent lists them, so two reads
/// of an unchanged tree return identical results. A child id whose record
/// is gone (left behind by an interrupted mutation) is logged and skipped.
#[derive(Clone)]
pub struct TreeService {
    /// Store handle.
    store: Arc<dyn TreeStore>,
}

/// Running totals while building a [`ContentTree`].
#[derive(Default)]
struct Walk {
    visited: HashSet<FolderId>,
    folders: u64,
    conversations: u64,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(store: Arc<dyn TreeStore>) -> Self {
        Self { store }
    }

    /// Returns every folder and conversation under the caller's root,
    /// conversations with their full message lists.
    pub async fn get_all_content(&self, ctx: &RequestContext) -> AppResult<ContentTree> {
        let root = self.root(ctx).await?;
        let mut walk = Walk::default();
        let root = self.build_node(root, &mut walk).await?;

        Ok(ContentTree {
            root,
            // The root is not counted.
            total_folders: walk.folders.saturating_sub(1),
            total_conversations: walk.conversations,
        })
    }

    /// Returns the names of all folders below the caller's root, in
    /// depth-first pre-order.
    pub async fn get_folders(&self, ctx: &RequestContext) -> AppResult<Vec<String>> {
        let root = self.root(ctx).await?;
        let mut names = Vec::new();
        let mut visited = HashSet::from([root.id]);
        let mut stack: Vec<FolderId> = root.children.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                warn!(folder_id = %id, "Folder reached twice, skipping");
                continue;
            }
            let Some(folder) = self.store.find_folder(id).await? else {
                warn!(folder_id = %id, "Dangling child folder reference");
                continue;
            };
            stack.extend(folder.children.iter().rev().copied());
            names.push(folder.name);
        }

        Ok(names)
    }

    async fn root(&self, ctx: &RequestContext) -> AppResult<Folder> {
        self.store
            .find_folder(ctx.root_folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Root folder not found"))
    }

    fn build_node<'a>(
        &'a self,
        folder: Folder,
        walk: &'a mut Walk,
    ) -> BoxFuture<'a, AppResult<FolderNode>> {
        Box::pin(async move {
            walk.visited.insert(folder.id);
            walk.folders += 1;

            let mut conversations = Vec::with_capacity(folder.conversations.len());
            for id in &folder.conversations {
                match self.store.find_conversation(*id).await? {
                    Some(conversation) => conversations.push(conversation),
                    None => warn!(
                        folder_id = %folder.id,
                        conversation_id = %id,
                        "Dangling conversation reference"
                    ),
                }
            }
            walk.conversations += conversations.len() as u64;

            let mut folders = Vec::with_capacity(folder.children.len());
            for id in &folder.children {
                if walk.visited.contains(id) {
                    warn!(folder_id = %id, "Folder reached twice, skipping");
                    continue;
                }
                let Some(child) = self.store.find_folder(*id).await? else {
                    warn!(folder_id = %folder.id, child_id = %id, "Dangling child folder reference");
                    continue;
                };
                folders.push(self.build_node(child, walk).await?);
            }

            Ok(FolderNode {
                id: folder.id,
                name: folder.name,
                folders,
                conversations,
            })
        })
    }
}

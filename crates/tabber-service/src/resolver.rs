//! Path resolution from a user's root folder.

use std::sync::Arc;

use tabber_core::error::AppError;
use tabber_core::result::AppResult;
use tabber_core::types::{FolderId, NodePath};
use tabber_database::TreeStore;
use tabber_entity::{Conversation, Folder, NodeKind, NodeRef};

/// The record a path resolved to.
#[derive(Debug, Clone)]
pub enum ResolvedNode {
    /// A folder (the empty path always resolves to the root folder).
    Folder(Folder),
    /// A conversation.
    Conversation(Conversation),
}

impl ResolvedNode {
    /// The kind of node resolved.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Folder(_) => NodeKind::Folder,
            Self::Conversation(_) => NodeKind::Conversation,
        }
    }
}

/// Walks paths through child-folder links.
///
/// Lookups are exact and case-sensitive. Resolution only reads from the
/// store, so it is safe to run concurrently with anything.
#[derive(Clone)]
pub struct PathResolver {
    store: Arc<dyn TreeStore>,
}

impl PathResolver {
    /// Creates a resolver over a store handle.
    pub fn new(store: Arc<dyn TreeStore>) -> Self {
        Self { store }
    }

    /// Resolve `path` below `root`.
    ///
    /// `expect` names the kind the caller needs at the final segment;
    /// `None` accepts either. Intermediate segments must all be folders.
    pub async fn resolve(
        &self,
        root: FolderId,
        path: &NodePath,
        expect: Option<NodeKind>,
    ) -> AppResult<ResolvedNode> {
        let Some((parent_path, name)) = path.split_last() else {
            let root = self.load_folder(root, "root").await?;
            return check_kind(ResolvedNode::Folder(root), expect, path);
        };

        let parent = self.walk(root, &parent_path).await?;
        let node = match self.store.find_child(parent, name).await? {
            Some(NodeRef::Folder(id)) => ResolvedNode::Folder(self.load_folder(id, name).await?),
            Some(NodeRef::Conversation(id)) => ResolvedNode::Conversation(
                self.store
                    .find_conversation(id)
                    .await?
                    .ok_or_else(|| missing(path))?,
            ),
            None => return Err(missing(path)),
        };

        check_kind(node, expect, path)
    }

    /// Resolve a path that must name a folder.
    pub async fn resolve_folder(&self, root: FolderId, path: &NodePath) -> AppResult<Folder> {
        match self.resolve(root, path, Some(NodeKind::Folder)).await? {
            ResolvedNode::Folder(folder) => Ok(folder),
            ResolvedNode::Conversation(_) => Err(wrong_type(path, NodeKind::Folder)),
        }
    }

    /// Resolve a path that must name a conversation.
    pub async fn resolve_conversation(
        &self,
        root: FolderId,
        path: &NodePath,
    ) -> AppResult<Conversation> {
        match self.resolve(root, path, Some(NodeKind::Conversation)).await? {
            ResolvedNode::Conversation(conversation) => Ok(conversation),
            ResolvedNode::Folder(_) => Err(wrong_type(path, NodeKind::Conversation)),
        }
    }

    /// Resolve everything but the final segment to a folder, for creates.
    ///
    /// Returns the parent folder id and the final segment. The root path
    /// has no final segment and is rejected.
    pub async fn resolve_parent<'p>(
        &self,
        root: FolderId,
        path: &'p NodePath,
    ) -> AppResult<(FolderId, &'p str)> {
        let (parent_path, name) = path
            .split_last()
            .ok_or_else(|| AppError::malformed_path("Path must name a node below the root"))?;
        let parent = self.walk(root, &parent_path).await?;
        Ok((parent, name))
    }

    /// Follow every segment of `path` as a folder and return the last one.
    async fn walk(&self, root: FolderId, path: &NodePath) -> AppResult<FolderId> {
        let mut current = root;
        for (depth, segment) in path.segments().iter().enumerate() {
            current = match self.store.find_child(current, segment).await? {
                Some(NodeRef::Folder(id)) => id,
                Some(NodeRef::Conversation(_)) => {
                    return Err(AppError::wrong_type(format!(
                        "'{}' is a conversation and cannot contain other nodes",
                        prefix(path, depth)
                    )));
                }
                None => {
                    return Err(AppError::not_found(format!(
                        "'{}' not found",
                        prefix(path, depth)
                    )));
                }
            };
        }
        Ok(current)
    }

    async fn load_folder(&self, id: FolderId, label: &str) -> AppResult<Folder> {
        self.store
            .find_folder(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder '{label}' not found")))
    }
}

fn check_kind(
    node: ResolvedNode,
    expect: Option<NodeKind>,
    path: &NodePath,
) -> AppResult<ResolvedNode> {
    match expect {
        Some(kind) if kind != node.kind() => Err(wrong_type(path, kind)),
        _ => Ok(node),
    }
}

fn missing(path: &NodePath) -> AppError {
    AppError::not_found(format!("'{path}' not found"))
}

fn wrong_type(path: &NodePath, expected: NodeKind) -> AppError {
    if path.is_root() {
        return AppError::wrong_type(format!("The root is not a {expected}"));
    }
    AppError::wrong_type(format!("'{path}' is not a {expected}"))
}

/// The first `depth + 1` segments joined back together, for messages.
fn prefix(path: &NodePath, depth: usize) -> String {
    path.segments()[..=depth].join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Harness, path};
    use tabber_core::ErrorKind;
    use tabber_entity::Message;

    #[tokio::test]
    async fn test_empty_path_is_root() {
        let h = Harness::new().await;
        let node = h
            .resolver
            .resolve(h.ctx.root_folder_id, &NodePath::root(), None)
            .await
            .unwrap();
        match node {
            ResolvedNode::Folder(f) => assert_eq!(f.id, h.ctx.root_folder_id),
            other => panic!("expected root folder, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_before_and_after_create() {
        let h = Harness::new().await;
        let root = h.ctx.root_folder_id;

        let err = h.resolver.resolve(root, &path("A/B"), None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        h.folders.add_folder(&h.ctx, &path("A")).await.unwrap();
        let created = h.folders.add_folder(&h.ctx, &path("A/B")).await.unwrap();

        let found = h.resolver.resolve_folder(root, &path("A/B")).await.unwrap();
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn test_cannot_traverse_conversation() {
        let h = Harness::new().await;
        h.conversations
            .add_conversation(&h.ctx, &path("Chat"), vec![Message::new("a", "hi")])
            .await
            .unwrap();

        let err = h
            .resolver
            .resolve(h.ctx.root_folder_id, &path("Chat/Inner"), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::WrongType);
    }

    #[tokio::test]
    async fn test_expected_kind_mismatch() {
        let h = Harness::new().await;
        let root = h.ctx.root_folder_id;
        h.folders.add_folder(&h.ctx, &path("Work")).await.unwrap();

        let err = h
            .resolver
            .resolve_conversation(root, &path("Work"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::WrongType);

        let err = h
            .resolver
            .resolve_conversation(root, &NodePath::root())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::WrongType);

        assert!(h.resolver.resolve(root, &path("Work"), None).await.is_ok());
    }

    #[tokio::test]
    async fn test_case_sensitive() {
        let h = Harness::new().await;
        h.folders.add_folder(&h.ctx, &path("Work")).await.unwrap();
        let err = h
            .resolver
            .resolve(h.ctx.root_folder_id, &path("work"), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_resolve_parent_of_root_is_malformed() {
        let h = Harness::new().await;
        let root_path = NodePath::root();
        let err = h
            .resolver
            .resolve_parent(h.ctx.root_folder_id, &root_path)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedPath);
    }

    #[tokio::test]
    async fn test_users_cannot_reach_each_other() {
        let h = Harness::new().await;
        h.folders.add_folder(&h.ctx, &path("Private")).await.unwrap();

        let other = h.second_user("b@x.com").await;
        let err = h
            .resolver
            .resolve(other.root_folder_id, &path("Private"), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}

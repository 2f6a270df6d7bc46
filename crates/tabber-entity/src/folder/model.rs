//! Folder entity model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tabber_core::types::{ConversationId, FolderId, UserId};

/// Name given to every user's root folder. The root is never addressed by
/// name; the empty path resolves to it.
pub const ROOT_FOLDER_NAME: &str = "root";

/// A folder in a user's tree.
///
/// Each folder holds its parent id and the ids of its direct children. Names
/// live only on the child records, so a rename touches exactly one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Parent folder ID (null for the root folder).
    pub parent_id: Option<FolderId>,
    /// The owning user. Never changes.
    pub owner_id: UserId,
    /// Child folders, in creation order.
    pub children: Vec<FolderId>,
    /// Conversations directly inside this folder, in creation order.
    pub conversations: Vec<ConversationId>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Whether the folder has no child folders and no conversations.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.conversations.is_empty()
    }
}

/// Data required to create a new folder under an existing parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Parent folder.
    pub parent_id: FolderId,
    /// Folder name.
    pub name: String,
    /// The folder owner.
    pub owner_id: UserId,
}

/// The two kinds of node that share a folder's sibling namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A folder.
    Folder,
    /// A conversation.
    Conversation,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Folder => write!(f, "folder"),
            Self::Conversation => write!(f, "conversation"),
        }
    }
}

/// A reference to a named child of a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum NodeRef {
    /// A child folder.
    Folder(FolderId),
    /// A conversation.
    Conversation(ConversationId),
}

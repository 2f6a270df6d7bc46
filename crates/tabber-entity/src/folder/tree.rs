//! Nested folder/conversation structures returned to clients.

use serde::{Deserialize, Serialize};

use tabber_core::types::FolderId;

use crate::conversation::Conversation;

/// A folder with everything beneath it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderNode {
    /// Folder ID.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Child folder nodes.
    pub folders: Vec<FolderNode>,
    /// Conversations in this folder, with full message lists.
    pub conversations: Vec<Conversation>,
}

impl FolderNode {
    /// Find a direct child folder by name.
    pub fn folder(&self, name: &str) -> Option<&FolderNode> {
        self.folders.iter().find(|f| f.name == name)
    }

    /// Find a direct conversation by name.
    pub fn conversation(&self, name: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.name == name)
    }
}

/// A user's complete tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentTree {
    /// The root folder node.
    pub root: FolderNode,
    /// Number of folders below the root.
    pub total_folders: u64,
    /// Number of conversations anywhere in the tree.
    pub total_conversations: u64,
}

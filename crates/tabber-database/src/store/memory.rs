//! In-memory tree store for single-node deployments and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use tabber_core::error::AppError;
use tabber_core::result::AppResult;
use tabber_core::types::{ConversationId, FolderId, UserId};
use tabber_entity::folder::ROOT_FOLDER_NAME;
use tabber_entity::{
    Conversation, CreateConversation, CreateFolder, CreateUser, Folder, Message, NodeRef,
    StoreDump, User,
};

use super::TreeStore;

/// Arena of all records, addressed by id.
#[derive(Debug, Default)]
struct Arena {
    users: HashMap<UserId, User>,
    /// Lower-cased email to user.
    emails: HashMap<String, UserId>,
    folders: HashMap<FolderId, Folder>,
    conversations: HashMap<ConversationId, Conversation>,
}

impl Arena {
    /// Find a direct child of `parent` by name, ignoring dangling ids.
    fn child_named(&self, parent: &Folder, name: &str) -> Option<NodeRef> {
        let folder = parent
            .children
            .iter()
            .filter_map(|id| self.folders.get(id))
            .find(|f| f.name == name)
            .map(|f| NodeRef::Folder(f.id));

        folder.or_else(|| {
            parent
                .conversations
                .iter()
                .filter_map(|id| self.conversations.get(id))
                .find(|c| c.name == name)
                .map(|c| NodeRef::Conversation(c.id))
        })
    }

    /// Fail with `AlreadyExists` if `name` is used by a sibling other than `exclude`.
    fn ensure_name_free(
        &self,
        parent_id: FolderId,
        name: &str,
        exclude: Option<NodeRef>,
    ) -> AppResult<()> {
        let parent = self
            .folders
            .get(&parent_id)
            .ok_or_else(|| AppError::not_found(format!("Folder {parent_id} not found")))?;

        match self.child_named(parent, name) {
            Some(existing) if Some(existing) != exclude => Err(AppError::already_exists(format!(
                "'{name}' already exists in this folder"
            ))),
            _ => Ok(()),
        }
    }
}

/// Tree store that keeps every record in process memory.
///
/// A single `RwLock` guards the arena, so every mutation, including its
/// sibling-name check, happens atomically with respect to all others.
#[derive(Debug, Clone, Default)]
pub struct MemoryTreeStore {
    arena: Arc<RwLock<Arena>>,
}

impl MemoryTreeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TreeStore for MemoryTreeStore {
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let arena = self.arena.read().await;
        Ok(arena
            .emails
            .get(&email.to_lowercase())
            .and_then(|id| arena.users.get(id))
            .cloned())
    }

    async fn find_user(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.arena.read().await.users.get(&id).cloned())
    }

    async fn insert_user(&self, data: &CreateUser) -> AppResult<User> {
        let mut arena = self.arena.write().await;
        let key = data.email.to_lowercase();
        if arena.emails.contains_key(&key) {
            return Err(AppError::email_taken(format!(
                "Email '{}' is already registered",
                data.email
            )));
        }

        let now = Utc::now();
        let user_id = UserId::new();
        let root = Folder {
            id: FolderId::new(),
            name: ROOT_FOLDER_NAME.to_string(),
            parent_id: None,
            owner_id: user_id,
            children: Vec::new(),
            conversations: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        let user = User {
            id: user_id,
            email: key.clone(),
            password_hash: data.password_hash.clone(),
            root_folder_id: root.id,
            created_at: now,
        };

        arena.folders.insert(root.id, root);
        arena.emails.insert(key, user_id);
        arena.users.insert(user_id, user.clone());
        debug!(user_id = %user_id, "Inserted user and root folder");
        Ok(user)
    }

    async fn find_folder(&self, id: FolderId) -> AppResult<Option<Folder>> {
        Ok(self.arena.read().await.folders.get(&id).cloned())
    }

    async fn find_conversation(&self, id: ConversationId) -> AppResult<Option<Conversation>> {
        Ok(self.arena.read().await.conversations.get(&id).cloned())
    }

    async fn find_child(&self, parent: FolderId, name: &str) -> AppResult<Option<NodeRef>> {
        let arena = self.arena.read().await;
        let folder = arena
            .folders
            .get(&parent)
            .ok_or_else(|| AppError::not_found(format!("Folder {parent} not found")))?;
        Ok(arena.child_named(folder, name))
    }

    async fn insert_folder(&self, data: &CreateFolder) -> AppResult<Folder> {
        let mut arena = self.arena.write().await;
        arena.ensure_name_free(data.parent_id, &data.name, None)?;

        let now = Utc::now();
        let folder = Folder {
            id: FolderId::new(),
            name: data.name.clone(),
            parent_id: Some(data.parent_id),
            owner_id: data.owner_id,
            children: Vec::new(),
            conversations: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        if let Some(parent) = arena.folders.get_mut(&data.parent_id) {
            parent.children.push(folder.id);
            parent.updated_at = now;
        }
        arena.folders.insert(folder.id, folder.clone());
        Ok(folder)
    }

    async fn insert_conversation(&self, data: &CreateConversation) -> AppResult<Conversation> {
        let mut arena = self.arena.write().await;
        arena.ensure_name_free(data.folder_id, &data.name, None)?;

        let now = Utc::now();
        let conversation = Conversation {
            id: ConversationId::new(),
            name: data.name.clone(),
            folder_id: data.folder_id,
            messages: data.messages.clone(),
            created_at: now,
            updated_at: now,
        };

        if let Some(parent) = arena.folders.get_mut(&data.folder_id) {
            parent.conversations.push(conversation.id);
            parent.updated_at = now;
        }
        arena
            .conversations
            .insert(conversation.id, conversation.clone());
        Ok(conversation)
    }

    async fn rename_folder(&self, id: FolderId, new_name: &str) -> AppResult<Folder> {
        let mut arena = self.arena.write().await;
        let parent_id = arena
            .folders
            .get(&id)
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?
            .parent_id
            .ok_or_else(|| AppError::forbidden("The root folder cannot be renamed"))?;

        arena.ensure_name_free(parent_id, new_name, Some(NodeRef::Folder(id)))?;

        let folder = arena
            .folders
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
        folder.name = new_name.to_string();
        folder.updated_at = Utc::now();
        Ok(folder.clone())
    }

    async fn rename_conversation(
        &self,
        id: ConversationId,
        new_name: &str,
    ) -> AppResult<Conversation> {
        let mut arena = self.arena.write().await;
        let folder_id = arena
            .conversations
            .get(&id)
            .ok_or_else(|| AppError::not_found(format!("Conversation {id} not found")))?
            .folder_id;

        arena.ensure_name_free(folder_id, new_name, Some(NodeRef::Conversation(id)))?;

        let conversation = arena
            .conversations
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Conversation {id} not found")))?;
        conversation.name = new_name.to_string();
        conversation.updated_at = Utc::now();
        Ok(conversation.clone())
    }

    async fn append_messages(
        &self,
        id: ConversationId,
        messages: &[Message],
    ) -> AppResult<Conversation> {
        let mut arena = self.arena.write().await;
        let conversation = arena
            .conversations
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Conversation {id} not found")))?;
        conversation.messages.extend_from_slice(messages);
        conversation.updated_at = Utc::now();
        Ok(conversation.clone())
    }

    async fn delete_folder(&self, id: FolderId) -> AppResult<bool> {
        let mut arena = self.arena.write().await;
        let Some(folder) = arena.folders.get(&id) else {
            return Ok(false);
        };
        let Some(parent_id) = folder.parent_id else {
            return Err(AppError::forbidden("The root folder cannot be deleted"));
        };
        if !folder.is_empty() {
            return Err(AppError::not_empty(format!(
                "Folder '{}' is not empty",
                folder.name
            )));
        }

        if let Some(parent) = arena.folders.get_mut(&parent_id) {
            parent.children.retain(|child| *child != id);
            parent.updated_at = Utc::now();
        }
        arena.folders.remove(&id);
        Ok(true)
    }

    async fn delete_conversation(&self, id: ConversationId) -> AppResult<bool> {
        let mut arena = self.arena.write().await;
        let Some(conversation) = arena.conversations.remove(&id) else {
            return Ok(false);
        };
        if let Some(parent) = arena.folders.get_mut(&conversation.folder_id) {
            parent.conversations.retain(|c| *c != id);
            parent.updated_at = Utc::now();
        }
        Ok(true)
    }

    async fn dump(&self) -> AppResult<StoreDump> {
        let arena = self.arena.read().await;
        let mut dump = StoreDump {
            users: arena.users.values().cloned().collect(),
            folders: arena.folders.values().cloned().collect(),
            conversations: arena.conversations.values().cloned().collect(),
        };
        dump.users.sort_by_key(|u| (u.created_at, u.id));
        dump.folders.sort_by_key(|f| (f.created_at, f.id));
        dump.conversations.sort_by_key(|c| (c.created_at, c.id));
        Ok(dump)
    }
}

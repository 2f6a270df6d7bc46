//! The record interface the tree engine persists through.
//!
//! Every method is atomic at the level the engine needs: a create checks the
//! sibling namespace, inserts the record, and links it into its parent in
//! one step, so two racing creates of the same name can never both succeed.
//! Deletes unlink from the parent in the same step as the record removal and
//! refuse folders that still have children, so a successful call never
//! leaves a dangling reference.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use tabber_core::result::AppResult;
use tabber_core::types::{ConversationId, FolderId, UserId};
use tabber_entity::{
    Conversation, CreateConversation, CreateFolder, CreateUser, Folder, Message, NodeRef,
    StoreDump, User,
};

pub use memory::MemoryTreeStore;
pub use postgres::PgTreeStore;

/// Persistence for users, folders, and conversations.
#[async_trait]
pub trait TreeStore: Send + Sync + 'static {
    /// Find a user by email (case-insensitive).
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by primary key.
    async fn find_user(&self, id: UserId) -> AppResult<Option<User>>;

    /// Create a user together with its root folder.
    ///
    /// Fails with `EmailTaken` if the email is already registered.
    async fn insert_user(&self, data: &CreateUser) -> AppResult<User>;

    /// Find a folder by primary key.
    async fn find_folder(&self, id: FolderId) -> AppResult<Option<Folder>>;

    /// Find a conversation by primary key.
    async fn find_conversation(&self, id: ConversationId) -> AppResult<Option<Conversation>>;

    /// Look up a direct child of `parent` by exact name.
    async fn find_child(&self, parent: FolderId, name: &str) -> AppResult<Option<NodeRef>>;

    /// Create a folder and link it into its parent.
    ///
    /// Fails with `NotFound` if the parent is gone and `AlreadyExists` if
    /// any sibling already uses the name.
    async fn insert_folder(&self, data: &CreateFolder) -> AppResult<Folder>;

    /// Create a conversation and link it into its folder.
    async fn insert_conversation(&self, data: &CreateConversation) -> AppResult<Conversation>;

    /// Rename a folder in place, keeping its id and links.
    async fn rename_folder(&self, id: FolderId, new_name: &str) -> AppResult<Folder>;

    /// Rename a conversation in place, keeping its id and links.
    async fn rename_conversation(
        &self,
        id: ConversationId,
        new_name: &str,
    ) -> AppResult<Conversation>;

    /// Append messages to the end of a conversation.
    async fn append_messages(
        &self,
        id: ConversationId,
        messages: &[Message],
    ) -> AppResult<Conversation>;

    /// Delete an empty, non-root folder and unlink it from its parent.
    ///
    /// Returns `false` if the folder did not exist. Fails with `NotEmpty`
    /// if it still has children and `Forbidden` for a root folder.
    async fn delete_folder(&self, id: FolderId) -> AppResult<bool>;

    /// Delete a conversation and unlink it from its folder.
    async fn delete_conversation(&self, id: ConversationId) -> AppResult<bool>;

    /// Snapshot every record.
    async fn dump(&self) -> AppResult<StoreDump>;
}

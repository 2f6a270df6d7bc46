//! Shared fixtures for the service unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use tabber_auth::{PasswordHasher, PasswordValidator};
use tabber_core::config::{AuthConfig, TreeConfig};
use tabber_core::result::AppResult;
use tabber_core::types::{ConversationId, FolderId, NodePath, UserId};
use tabber_database::{MemoryTreeStore, TreeStore};
use tabber_entity::{
    Conversation, CreateConversation, CreateFolder, CreateUser, Folder, Message, NodeRef,
    StoreDump, User,
};

use crate::{
    AccountService, ConversationService, FolderService, PathResolver, RequestContext, TreeService,
};

pub(crate) fn path(raw: &str) -> NodePath {
    NodePath::parse(raw).expect("valid test path")
}

pub(crate) fn cheap_auth() -> AuthConfig {
    AuthConfig {
        argon2_memory_kib: 256,
        argon2_iterations: 1,
        ..AuthConfig::default()
    }
}

/// Every service wired to one memory store, with `a@x.com` registered.
pub(crate) struct Harness {
    pub store: Arc<dyn TreeStore>,
    pub accounts: AccountService,
    pub resolver: PathResolver,
    pub folders: FolderService,
    pub conversations: ConversationService,
    pub tree: TreeService,
    pub ctx: RequestContext,
}

impl Harness {
    pub async fn new() -> Self {
        Self::with_tree_config(TreeConfig::default()).await
    }

    pub async fn with_tree_config(tree_config: TreeConfig) -> Self {
        let store: Arc<dyn TreeStore> = Arc::new(MemoryTreeStore::new());
        let auth = cheap_auth();
        let accounts = AccountService::new(
            Arc::clone(&store),
            Arc::new(PasswordHasher::new(&auth).expect("hasher")),
            PasswordValidator::new(&auth),
        );
        let user = accounts
            .register("a@x.com", "password123")
            .await
            .expect("register");

        Self {
            resolver: PathResolver::new(Arc::clone(&store)),
            folders: FolderService::new(Arc::clone(&store), tree_config),
            conversations: ConversationService::new(Arc::clone(&store)),
            tree: TreeService::new(Arc::clone(&store)),
            ctx: RequestContext::for_user(&user),
            accounts,
            store,
        }
    }

    pub async fn second_user(&self, email: &str) -> User {
        self.accounts
            .register(email, "password123")
            .await
            .expect("register")
    }
}

/// Wraps a store to interleave a write with a read, or to hand out folders
/// that list children with no record behind them.
pub(crate) struct HookedStore {
    inner: Arc<dyn TreeStore>,
    late_child: Mutex<Option<CreateFolder>>,
    dangling: Vec<FolderId>,
}

impl HookedStore {
    /// Inserts `child` right after its parent is first read.
    pub fn late_child(inner: Arc<dyn TreeStore>, child: CreateFolder) -> Self {
        Self {
            inner,
            late_child: Mutex::new(Some(child)),
            dangling: Vec::new(),
        }
    }

    /// Every read of a folder in `folders` also lists a child folder and a
    /// conversation that do not exist.
    pub fn dangling(inner: Arc<dyn TreeStore>, folders: Vec<FolderId>) -> Self {
        Self {
            inner,
            late_child: Mutex::new(None),
            dangling: folders,
        }
    }

    fn take_late_child(&self, parent: FolderId) -> Option<CreateFolder> {
        let mut slot = self.late_child.lock().unwrap();
        match slot.as_ref() {
            Some(child) if child.parent_id == parent => slot.take(),
            _ => None,
        }
    }
}

#[async_trait]
impl TreeStore for HookedStore {
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.inner.find_user_by_email(email).await
    }

    async fn find_user(&self, id: UserId) -> AppResult<Option<User>> {
        self.inner.find_user(id).await
    }

    async fn insert_user(&self, data: &CreateUser) -> AppResult<User> {
        self.inner.insert_user(data).await
    }

    async fn find_folder(&self, id: FolderId) -> AppResult<Option<Folder>> {
        let found = self.inner.find_folder(id).await?;
        if let Some(child) = self.take_late_child(id) {
            self.inner.insert_folder(&child).await?;
        }
        Ok(found.map(|mut folder| {
            if self.dangling.contains(&id) {
                folder.children.insert(0, FolderId::new());
                folder.conversations.push(ConversationId::new());
            }
            folder
        }))
    }

    async fn find_conversation(&self, id: ConversationId) -> AppResult<Option<Conversation>> {
        self.inner.find_conversation(id).await
    }

    async fn find_child(&self, parent: FolderId, name: &str) -> AppResult<Option<NodeRef>> {
        self.inner.find_child(parent, name).await
    }

    async fn insert_folder(&self, data: &CreateFolder) -> AppResult<Folder> {
        self.inner.insert_folder(data).await
    }

    async fn insert_conversation(&self, data: &CreateConversation) -> AppResult<Conversation> {
        self.inner.insert_conversation(data).await
    }

    async fn rename_folder(&self, id: FolderId, new_name: &str) -> AppResult<Folder> {
        self.inner.rename_folder(id, new_name).await
    }

    async fn rename_conversation(
        &self,
        id: ConversationId,
        new_name: &str,
    ) -> AppResult<Conversation> {
        self.inner.rename_conversation(id, new_name).await
    }

    async fn append_messages(
        &self,
        id: ConversationId,
        messages: &[Message],
    ) -> AppResult<Conversation> {
        self.inner.append_messages(id, messages).await
    }

    async fn delete_folder(&self, id: FolderId) -> AppResult<bool> {
        self.inner.delete_folder(id).await
    }

    async fn delete_conversation(&self, id: ConversationId) -> AppResult<bool> {
        self.inner.delete_conversation(id).await
    }

    async fn dump(&self) -> AppResult<StoreDump> {
        self.inner.dump().await
    }
}

//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use tabber_auth::{PasswordHasher, PasswordValidator};
use tabber_core::config::AppConfig;
use tabber_core::result::AppResult;
use tabber_database::TreeStore;
use tabber_service::{AccountService, ConversationService, FolderService, TreeService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Tree store handle, shared by every service
    pub store: Arc<dyn TreeStore>,
    /// Registration and credential checks
    pub account_service: Arc<AccountService>,
    /// Folder mutations
    pub folder_service: Arc<FolderService>,
    /// Conversation mutations and reads
    pub conversation_service: Arc<ConversationService>,
    /// Whole-tree reads
    pub tree_service: Arc<TreeService>,
}

impl AppState {
    /// Wires every service over one store handle.
    pub fn new(config: AppConfig, store: Arc<dyn TreeStore>) -> AppResult<Self> {
        let hasher = Arc::new(PasswordHasher::new(&config.auth)?);
        let validator = PasswordValidator::new(&config.auth);

        Ok(Self {
            account_service: Arc::new(AccountService::new(
                Arc::clone(&store),
                hasher,
                validator,
            )),
            folder_service: Arc::new(FolderService::new(
                Arc::clone(&store),
                config.tree.clone(),
            )),
            conversation_service: Arc::new(ConversationService::new(Arc::clone(&store))),
            tree_service: Arc::new(TreeService::new(Arc::clone(&store))),
            config: Arc::new(config),
            store,
        })
    }
}

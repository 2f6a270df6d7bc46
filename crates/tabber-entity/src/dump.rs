//! Whole-store snapshot for local debugging.

use serde::{Deserialize, Serialize};

use crate::conversation::Conversation;
use crate::folder::Folder;
use crate::user::User;

/// Every record in a store. Password hashes are never serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreDump {
    /// All users.
    pub users: Vec<User>,
    /// All folders.
    pub folders: Vec<Folder>,
    /// All conversations.
    pub conversations: Vec<Conversation>,
}

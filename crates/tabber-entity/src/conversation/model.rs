//! Conversation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tabber_core::types::{ConversationId, FolderId};

/// One message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Free-text author label. Not a user reference.
    pub author: String,
    /// Ordered content fragments.
    pub content: Vec<String>,
}

impl Message {
    /// Create a message with a single content fragment.
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            content: vec![content.into()],
        }
    }
}

/// A named, ordered list of messages inside one folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique conversation identifier.
    pub id: ConversationId,
    /// Conversation name, unique among its folder's children.
    pub name: String,
    /// The folder that contains this conversation.
    pub folder_id: FolderId,
    /// Messages in order.
    pub messages: Vec<Message>,
    /// When the conversation was created.
    pub created_at: DateTime<Utc>,
    /// When the conversation was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateConversation {
    /// Containing folder.
    pub folder_id: FolderId,
    /// Conversation name.
    pub name: String,
    /// Initial messages.
    pub messages: Vec<Message>,
}

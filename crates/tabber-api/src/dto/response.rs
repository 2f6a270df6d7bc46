//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tabber_core::types::{ConversationId, FolderId, NodePath, UserId};
use tabber_entity::{Conversation, Folder, Message, User};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Account summary. Never carries the credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: UserId,
    /// Email.
    pub email: String,
    /// Root folder ID.
    pub root_folder_id: FolderId,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            root_folder_id: user.root_folder_id,
            created_at: user.created_at,
        }
    }
}

/// A folder addressed by path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderResponse {
    /// Folder ID.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Path the folder is now reachable at.
    pub path: String,
}

impl FolderResponse {
    /// Builds the response for `folder`, reachable at `path`.
    pub fn new(folder: Folder, path: &NodePath) -> Self {
        Self {
            id: folder.id,
            name: folder.name,
            path: path.to_string(),
        }
    }
}

/// A conversation addressed by path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationResponse {
    /// Conversation ID.
    pub id: ConversationId,
    /// Conversation name.
    pub name: String,
    /// Path the conversation is now reachable at.
    pub path: String,
    /// Messages in order.
    pub messages: Vec<Message>,
    /// Last modification.
    pub updated_at: DateTime<Utc>,
}

impl ConversationResponse {
    /// Builds the response for `conversation`, reachable at `path`.
    pub fn new(conversation: Conversation, path: &NodePath) -> Self {
        Self {
            id: conversation.id,
            name: conversation.name,
            path: path.to_string(),
            messages: conversation.messages,
            updated_at: conversation.updated_at,
        }
    }
}

/// Flat folder listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderListResponse {
    /// Folder names, depth-first.
    pub folders: Vec<String>,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a new message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

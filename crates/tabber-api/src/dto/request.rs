//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use tabber_entity::Message;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email. Its format is checked after normalization by the account
    /// service.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// A body naming one node by path.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PathRequest {
    /// Slash-delimited path below the caller's root.
    pub path: String,
}

/// Create conversation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateConversationRequest {
    /// Where to create the conversation.
    pub path: String,
    /// Initial messages.
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Append messages request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppendMessagesRequest {
    /// The conversation to append to.
    pub path: String,
    /// Messages to add at the end.
    #[validate(length(min = 1, message = "At least one message is required"))]
    pub messages: Vec<Message>,
}

/// Rename request (folders and conversations).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameRequest {
    /// The node to rename.
    pub path: String,
    /// Its new name.
    #[validate(length(min = 1, message = "New name is required"))]
    pub new_name: String,
}

/// `?path=` query parameter.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PathQuery {
    /// Slash-delimited path below the caller's root.
    pub path: String,
}

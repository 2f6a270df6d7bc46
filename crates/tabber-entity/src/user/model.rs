//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tabber_core::types::{FolderId, UserId};

/// A registered account and the root of its folder tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Email address, stored lower-cased.
    pub email: String,
    /// Opaque credential produced by the password hasher.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// The user's root folder. Created together with the user.
    pub root_folder_id: FolderId,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Normalized (lower-cased) email.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
}

impl CreateUser {
    /// Normalize an email for storage and case-insensitive comparison.
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}

//! Request context carrying the authenticated user and their tree root.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tabber_core::types::{FolderId, UserId};
use tabber_entity::User;

/// Context for the current authenticated request.
///
/// Produced by the account gate and passed into every tree operation so
/// that each one knows *who* is acting and *where* their tree starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The user's email.
    pub email: String,
    /// Origin of every path this request resolves.
    pub root_folder_id: FolderId,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for a verified user.
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            root_folder_id: user.root_folder_id,
            request_time: Utc::now(),
        }
    }
}

//! Tree mutation policy.

use serde::{Deserialize, Serialize};

/// Folder tree policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Delete folders together with everything beneath them. When false,
    /// deleting a populated folder fails with `NotEmpty`.
    #[serde(default = "default_true")]
    pub cascade_delete: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            cascade_delete: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}

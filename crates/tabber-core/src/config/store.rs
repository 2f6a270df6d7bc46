//! Tree store backend selection.

use serde::{Deserialize, Serialize};

/// Which backend persists users, folders, and conversations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-process store; contents are lost on restart.
    #[default]
    Memory,
    /// PostgreSQL via the `database` section.
    Postgres,
}

/// Store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// The backend to use.
    #[serde(default)]
    pub backend: StoreBackend,
}

//! # tabber-database
//!
//! The tree store adapter. [`TreeStore`] is the narrow record interface the
//! tree engine talks to; [`MemoryTreeStore`] keeps everything in one
//! lock-protected arena and [`PgTreeStore`] persists to PostgreSQL.

pub mod connection;
pub mod migration;
pub mod store;

pub use connection::DatabasePool;
pub use store::{MemoryTreeStore, PgTreeStore, TreeStore};

//! # tabber-entity
//!
//! Domain records for Tabber. Every struct in this crate is either a stored
//! record (users, folders, conversations), a creation payload for one, or a
//! response value object built from them. All derive `Debug`, `Clone`,
//! `Serialize`, and `Deserialize`.

pub mod conversation;
pub mod dump;
pub mod folder;
pub mod user;

pub use conversation::{Conversation, CreateConversation, Message};
pub use dump::StoreDump;
pub use folder::{ContentTree, CreateFolder, Folder, FolderNode, NodeKind, NodeRef};
pub use user::{CreateUser, User};

//! Folder domain entities.

pub mod model;
pub mod tree;

pub use model::{CreateFolder, Folder, NodeKind, NodeRef, ROOT_FOLDER_NAME};
pub use tree::{ContentTree, FolderNode};

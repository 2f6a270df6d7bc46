//! Core type definitions used across the Tabber workspace.

pub mod id;
pub mod path;

pub use id::*;
pub use path::{NodePath, PATH_SEPARATOR, validate_name};

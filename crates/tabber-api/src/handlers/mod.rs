//! Route handlers, one module per resource.

pub mod account;
pub mod content;
pub mod conversation;
pub mod debug;
pub mod folder;
pub mod health;

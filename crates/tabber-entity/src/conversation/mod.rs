//! Conversation domain entities.

pub mod model;

pub use model::{Conversation, CreateConversation, Message};

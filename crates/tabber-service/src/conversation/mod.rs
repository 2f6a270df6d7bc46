//! Conversation mutations and reads.

pub mod service;

pub use service::ConversationService;

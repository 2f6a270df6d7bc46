//! # tabber-service
//!
//! The path-addressed folder/conversation tree engine. Each service holds
//! an explicitly passed [`TreeStore`](tabber_database::TreeStore) handle and
//! acts on behalf of a [`RequestContext`]; resolution always starts at the
//! caller's root folder, so no operation can reach another user's tree.

pub mod account;
pub mod context;
pub mod conversation;
pub mod folder;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use account::AccountService;
pub use context::RequestContext;
pub use conversation::ConversationService;
pub use folder::{FolderService, TreeService};
pub use resolver::{PathResolver, ResolvedNode};

//! Conversation create, read, append, rename and delete.

use std::sync::Arc;

use tracing::info;

use tabber_core::error::AppError;
use tabber_core::result::AppResult;
use tabber_core::types::{NodePath, validate_name};
use tabber_database::TreeStore;
use tabber_entity::{Conversation, CreateConversation, Message};

use crate::context::RequestContext;
use crate::resolver::PathResolver;

/// Manages conversations inside the caller's tree.
#[derive(Clone)]
pub struct ConversationService {
    store: Arc<dyn TreeStore>,
    resolver: PathResolver,
}

impl ConversationService {
    /// Creates a new conversation service.
    pub fn new(store: Arc<dyn TreeStore>) -> Self {
        Self {
            resolver: PathResolver::new(Arc::clone(&store)),
            store,
        }
    }

    /// Creates a conversation at `path` holding `messages`.
    pub async fn add_conversation(
        &self,
        ctx: &RequestContext,
        path: &NodePath,
        messages: Vec<Message>,
    ) -> AppResult<Conversation> {
        let (folder_id, name) = self.resolver.resolve_parent(ctx.root_folder_id, path).await?;

        let conversation = self
            .store
            .insert_conversation(&CreateConversation {
                folder_id,
                name: name.to_string(),
                messages,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            conversation_id = %conversation.id,
            path = %path,
            messages = conversation.messages.len(),
            "Conversation created"
        );
        Ok(conversation)
    }

    /// Reads the conversation at `path`.
    pub async fn get_conversation(
        &self,
        ctx: &RequestContext,
        path: &NodePath,
    ) -> AppResult<Conversation> {
        self.resolver
            .resolve_conversation(ctx.root_folder_id, path)
            .await
    }

    /// Appends `messages` to the end of the conversation at `path`.
    pub async fn append_messages(
        &self,
        ctx: &RequestContext,
        path: &NodePath,
        messages: Vec<Message>,
    ) -> AppResult<Conversation> {
        if messages.is_empty() {
            return Err(AppError::validation("No messages to append"));
        }

        let conversation = self
            .resolver
            .resolve_conversation(ctx.root_folder_id, path)
            .await?;
        let updated = self
            .store
            .append_messages(conversation.id, &messages)
            .await?;

        info!(
            user_id = %ctx.user_id,
            conversation_id = %updated.id,
            appended = messages.len(),
            "Messages appended"
        );
        Ok(updated)
    }

    /// Renames the conversation at `path`, keeping its id and messages.
    pub async fn rename_conversation(
        &self,
        ctx: &RequestContext,
        path: &NodePath,
        new_name: &str,
    ) -> AppResult<Conversation> {
        validate_name(new_name)?;
        let conversation = self
            .resolver
            .resolve_conversation(ctx.root_folder_id, path)
            .await?;
        if conversation.name == new_name {
            return Ok(conversation);
        }

        let renamed = self
            .store
            .rename_conversation(conversation.id, new_name)
            .await?;
        info!(
            user_id = %ctx.user_id,
            conversation_id = %renamed.id,
            from = %path,
            to = %new_name,
            "Conversation renamed"
        );
        Ok(renamed)
    }

    /// Deletes the conversation at `path` and unlinks it from its folder.
    pub async fn delete_conversation(&self, ctx: &RequestContext, path: &NodePath) -> AppResult<()> {
        let conversation = self
            .resolver
            .resolve_conversation(ctx.root_folder_id, path)
            .await?;

        if !self.store.delete_conversation(conversation.id).await? {
            return Err(AppError::not_found(format!("'{path}' not found")));
        }

        info!(
            user_id = %ctx.user_id,
            conversation_id = %conversation.id,
            path = %path,
            "Conversation deleted"
        );
        Ok(())
    }
}

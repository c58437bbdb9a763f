//! Message service
//!
//! Send, edit, delete, and list messages. Every operation re-runs the
//! permission evaluation; authorship gates edit and delete.

use beacon_core::events::{MessageDeletedEvent, MessageEvent};
use beacon_core::traits::{MessageRepository, ReactionRepository, UserRepository};
use beacon_core::{
    ChannelAction, DomainError, DomainEvent, Message, MessageAction, MessageQuery, ReactionCount,
    Snowflake, User,
};
use chrono::Utc;
use tracing::{info, instrument};

use crate::dto::{
    CreateMessageRequest, ListMessagesQuery, MessageResponse, ReactionGroupResponse,
    UpdateMessageRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Default page size for listings
const DEFAULT_PAGE: i64 = 50;
/// Hard cap on page size
const MAX_PAGE: i64 = 100;

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Send a message into a channel
    #[instrument(skip(self, request))]
    pub async fn send(
        &self,
        channel_id: Snowflake,
        author_id: Snowflake,
        request: CreateMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        Message::validate_content(&request.content)?;

        let channel = PermissionService::new(self.ctx)
            .require_channel(author_id, channel_id, ChannelAction::Send)
            .await?;

        // Id and timestamp are assigned here, at accept time; racing
        // sends both succeed and order by their assigned stamps.
        let message = Message::new(
            self.ctx.generate_id(),
            channel_id,
            author_id,
            request.content,
        );
        self.ctx.messages().create(&message).await?;

        let author = self.author_of(&message).await?;

        info!(message_id = %message.id, channel_id = %channel_id, "Message sent");

        self.ctx
            .bus()
            .publish(DomainEvent::MessageCreated(MessageEvent {
                message_id: message.id,
                channel_id,
                server_id: channel.server_id,
                author_id,
                content: message.content.clone(),
                edited_at: None,
                timestamp: Utc::now(),
            }));

        Ok(MessageResponse::new(&message, &author, Vec::new()))
    }

    /// Edit a message (author only); re-validates content and stamps
    /// `edited_at`
    #[instrument(skip(self, request))]
    pub async fn edit(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        actor: Snowflake,
        request: UpdateMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        Message::validate_content(&request.content)?;

        let channel = PermissionService::new(self.ctx)
            .require_channel(actor, channel_id, ChannelAction::Read)
            .await?;
        let mut message = self.message_in_channel(channel_id, message_id).await?;

        PermissionService::new(self.ctx).require_message(actor, &message, MessageAction::Edit)?;

        message.edit(request.content);
        self.ctx.messages().update(&message).await?;

        let author = self.author_of(&message).await?;
        let reactions = self.reaction_groups(message_id, actor).await?;

        info!(message_id = %message_id, "Message edited");

        self.ctx
            .bus()
            .publish(DomainEvent::MessageEdited(MessageEvent {
                message_id,
                channel_id,
                server_id: channel.server_id,
                author_id: message.author_id,
                content: message.content.clone(),
                edited_at: message.edited_at,
                timestamp: Utc::now(),
            }));

        Ok(MessageResponse::new(&message, &author, reactions))
    }

    /// Permanently delete a message (author only). Reactions go with it.
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        actor: Snowflake,
    ) -> ServiceResult<()> {
        let channel = PermissionService::new(self.ctx)
            .require_channel(actor, channel_id, ChannelAction::Read)
            .await?;
        let message = self.message_in_channel(channel_id, message_id).await?;

        PermissionService::new(self.ctx).require_message(actor, &message, MessageAction::Delete)?;

        self.ctx.messages().delete(message_id).await?;
        self.ctx.reactions().delete_by_message(message_id).await?;

        info!(message_id = %message_id, "Message deleted");

        self.ctx
            .bus()
            .publish(DomainEvent::MessageDeleted(MessageDeletedEvent {
                message_id,
                channel_id,
                server_id: channel.server_id,
                timestamp: Utc::now(),
            }));

        Ok(())
    }

    /// List messages ascending by `(created_at, id)` with cursor
    /// pagination. Deleted messages never appear.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        channel_id: Snowflake,
        actor: Snowflake,
        query: ListMessagesQuery,
    ) -> ServiceResult<Vec<MessageResponse>> {
        PermissionService::new(self.ctx)
            .require_channel(actor, channel_id, ChannelAction::Read)
            .await?;

        let parse_cursor = |raw: Option<String>| -> ServiceResult<Option<Snowflake>> {
            match raw {
                Some(s) => s
                    .parse()
                    .map(Some)
                    .map_err(|_| ServiceError::validation("invalid message cursor")),
                None => Ok(None),
            }
        };

        let store_query = MessageQuery {
            after: parse_cursor(query.after)?,
            before: parse_cursor(query.before)?,
            limit: query.limit.unwrap_or(DEFAULT_PAGE).clamp(1, MAX_PAGE),
        };

        let messages = self
            .ctx
            .messages()
            .find_by_channel(channel_id, store_query)
            .await?;

        let mut responses = Vec::with_capacity(messages.len());
        for message in &messages {
            let author = self.author_of(message).await?;
            let reactions = self.reaction_groups(message.id, actor).await?;
            responses.push(MessageResponse::new(message, &author, reactions));
        }
        Ok(responses)
    }

    /// Load a message and check it belongs to the addressed channel
    async fn message_in_channel(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> ServiceResult<Message> {
        let message = self
            .ctx
            .messages()
            .find_by_id(message_id)
            .await?
            .filter(|m| m.channel_id == channel_id)
            .ok_or(DomainError::MessageNotFound(message_id))?;
        Ok(message)
    }

    async fn author_of(&self, message: &Message) -> ServiceResult<User> {
        self.ctx
            .users()
            .find_by_id(message.author_id)
            .await?
            .ok_or_else(|| ServiceError::internal("message author missing from store"))
    }

    async fn reaction_groups(
        &self,
        message_id: Snowflake,
        viewer: Snowflake,
    ) -> ServiceResult<Vec<ReactionGroupResponse>> {
        let rows = self.ctx.reactions().find_by_message(message_id).await?;
        Ok(ReactionCount::aggregate(&rows, viewer)
            .iter()
            .map(ReactionGroupResponse::from)
            .collect())
    }
}

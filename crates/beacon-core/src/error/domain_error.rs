//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::entities::MAX_MESSAGE_LEN;
use crate::value_objects::{DenyReason, Snowflake};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("No user with tag {0}")]
    UserTagNotFound(String),

    #[error("Server not found: {0}")]
    ServerNotFound(Snowflake),

    #[error("Channel not found: {0}")]
    ChannelNotFound(Snowflake),

    #[error("Message not found: {0}")]
    MessageNotFound(Snowflake),

    #[error("Not a member of this server")]
    NotMember,

    #[error("Invite not found: {0}")]
    InviteNotFound(String),

    #[error("No such friend request")]
    NoSuchRequest,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Message content must not be empty")]
    EmptyContent,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Invalid tag format: {0}")]
    InvalidTag(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not the message author")]
    NotAuthor,

    #[error("Not the server owner")]
    NotOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Username and tag already in use")]
    TagAlreadyExists,

    #[error("Already a member of this server")]
    AlreadyMember,

    #[error("Already friends with this user")]
    AlreadyFriends,

    #[error("A friend request is already pending")]
    AlreadyPending,

    #[error("Invite code already exists")]
    InviteCodeExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::UserTagNotFound(_) => "UNKNOWN_USER_TAG",
            Self::ServerNotFound(_) => "UNKNOWN_SERVER",
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::NotMember => "NOT_MEMBER",
            Self::InviteNotFound(_) => "UNKNOWN_INVITE",
            Self::NoSuchRequest => "UNKNOWN_FRIEND_REQUEST",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::EmptyContent => "EMPTY_CONTENT",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::InvalidTag(_) => "INVALID_TAG",

            // Authorization
            Self::NotAuthor => "NOT_AUTHOR",
            Self::NotOwner => "NOT_OWNER",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::TagAlreadyExists => "TAG_ALREADY_EXISTS",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::AlreadyFriends => "ALREADY_FRIENDS",
            Self::AlreadyPending => "ALREADY_PENDING",
            Self::InviteCodeExists => "INVITE_CODE_EXISTS",

            // Infrastructure
            Self::StoreError(_) => "STORE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::UserTagNotFound(_)
                | Self::ServerNotFound(_)
                | Self::ChannelNotFound(_)
                | Self::MessageNotFound(_)
                | Self::InviteNotFound(_)
                | Self::NoSuchRequest
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::EmptyContent
                | Self::ContentTooLong { .. }
                | Self::InvalidEmail
                | Self::InvalidUsername(_)
                | Self::InvalidTag(_)
        )
    }

    /// Check if this is a permission-denial error
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::NotMember | Self::NotAuthor | Self::NotOwner)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::TagAlreadyExists
                | Self::AlreadyMember
                | Self::AlreadyFriends
                | Self::AlreadyPending
                | Self::InviteCodeExists
        )
    }

    /// Helper for content-length violations
    pub fn content_too_long() -> Self {
        Self::ContentTooLong {
            max: MAX_MESSAGE_LEN,
        }
    }
}

impl From<DenyReason> for DomainError {
    fn from(reason: DenyReason) -> Self {
        match reason {
            DenyReason::NotMember => Self::NotMember,
            DenyReason::NotAuthor => Self::NotAuthor,
            DenyReason::NotOwner => Self::NotOwner,
        }
    }
}

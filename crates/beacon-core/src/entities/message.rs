//! Message entity - a chat message in a channel

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Maximum message length in characters
pub const MAX_MESSAGE_LEN: usize = 4000;

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}

impl Message {
    /// Create a new Message with a server-assigned timestamp
    pub fn new(id: Snowflake, channel_id: Snowflake, author_id: Snowflake, content: String) -> Self {
        Self {
            id,
            channel_id,
            author_id,
            content,
            created_at: Utc::now(),
            edited_at: None,
        }
    }

    /// Validate content constraints: non-empty, at most [`MAX_MESSAGE_LEN`]
    /// characters. Content is otherwise passed through untouched so that
    /// arbitrary Unicode round-trips byte-for-byte.
    pub fn validate_content(content: &str) -> Result<(), DomainError> {
        if content.is_empty() {
            return Err(DomainError::EmptyContent);
        }
        if content.chars().count() > MAX_MESSAGE_LEN {
            return Err(DomainError::ContentTooLong {
                max: MAX_MESSAGE_LEN,
            });
        }
        Ok(())
    }

    /// Check if the message has been edited
    #[inline]
    pub fn is_edited(&self) -> bool {
        self.edited_at.is_some()
    }

    /// Edit the message content, stamping `edited_at`
    pub fn edit(&mut self, content: String) {
        self.content = content;
        self.edited_at = Some(Utc::now());
    }

    /// Ordering key for channel logs: `created_at` ascending with the id
    /// as a deterministic tie-break for messages accepted in the same
    /// millisecond.
    #[inline]
    pub fn sort_key(&self) -> (DateTime<Utc>, Snowflake) {
        (self.created_at, self.id)
    }
}

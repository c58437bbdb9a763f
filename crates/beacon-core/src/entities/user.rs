//! User entity - a registered account

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User entity
///
/// The `username`/`discriminator` pair and the email are unique across
/// all users; the password hash is owned by the auth layer and never
/// stored on this struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    /// Four-digit numeric tag distinguishing users that share a username
    pub discriminator: String,
    pub email: String,
    pub display_name: String,
    pub about: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(
        id: Snowflake,
        username: String,
        discriminator: String,
        email: String,
        display_name: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            discriminator,
            email,
            display_name,
            about: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Get the full tag: username#discriminator
    pub fn tag(&self) -> String {
        format!("{}#{}", self.username, self.discriminator)
    }

    /// Check whether this user matches a username/discriminator pair
    pub fn matches_tag(&self, username: &str, discriminator: &str) -> bool {
        self.username == username && self.discriminator == discriminator
    }

    /// Update the display name (owner only, enforced by the service layer)
    pub fn set_display_name(&mut self, display_name: String) {
        self.display_name = display_name;
        self.updated_at = Utc::now();
    }

    /// Update the about text
    pub fn set_about(&mut self, about: Option<String>) {
        self.about = about;
        self.updated_at = Utc::now();
    }
}

/// Split a `name#1234` tag into its username and discriminator parts
pub fn split_tag(tag: &str) -> Option<(&str, &str)> {
    let (username, discriminator) = tag.rsplit_once('#')?;
    if username.is_empty() || discriminator.len() != 4 {
        return None;
    }
    discriminator
        .chars()
        .all(|c| c.is_ascii_digit())
        .then_some((username, discriminator))
}

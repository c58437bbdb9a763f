//! Request DTOs
//!
//! Deserialized from the API surface and validated with `validator`
//! before any service logic runs.

use serde::Deserialize;
use validator::Validate;

/// Register a new account
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 2, max = 32))]
    pub username: String,

    #[validate(length(min = 1, max = 64))]
    pub display_name: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Log in with email and password
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Update the caller's own profile
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 64))]
    pub display_name: Option<String>,

    #[validate(length(max = 512))]
    pub about: Option<String>,
}

/// Create a server
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateServerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Update a server (owner only)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateServerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
}

/// Create a channel in a server (owner only)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateChannelRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// "text" or "voice"; DM channels are never created this way
    #[serde(rename = "type", default = "default_channel_type")]
    pub channel_type: String,

    #[validate(length(max = 1024))]
    pub topic: Option<String>,

    /// Category to place the channel under; defaults to the server's
    /// first category
    pub category_id: Option<String>,
}

fn default_channel_type() -> String {
    "text".to_string()
}

/// Create an invite for a server
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateInviteRequest {
    /// Maximum redemptions; 0 or absent means unlimited
    #[serde(default)]
    pub max_uses: i32,

    /// Lifetime in seconds; 0 or absent means no expiry
    #[serde(default)]
    pub max_age: i64,
}

/// Send a message
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMessageRequest {
    #[validate(length(min = 1, max = 4000))]
    pub content: String,
}

/// Edit a message
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMessageRequest {
    #[validate(length(min = 1, max = 4000))]
    pub content: String,
}

/// Send a friend request, addressed by `username#1234` tag
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FriendRequestBody {
    #[validate(length(min = 6, max = 37))]
    pub tag: String,
}

/// Cursor query for message listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMessagesQuery {
    /// Return messages after this message id
    pub after: Option<String>,
    /// Return messages before this message id
    pub before: Option<String>,
    /// Page size; clamped to 100
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_core::MAX_MESSAGE_LEN;

    #[test]
    fn test_register_validation() {
        let ok = RegisterRequest {
            email: "river@example.com".to_string(),
            username: "river".to_string(),
            display_name: "River".to_string(),
            password: "long enough".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..ok.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            password: "short".to_string(),
            ..ok
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_message_content_bounds() {
        let empty = CreateMessageRequest {
            content: String::new(),
        };
        assert!(empty.validate().is_err());

        // length is measured in characters, not bytes
        let emoji_max = CreateMessageRequest {
            content: "\u{1F600}".repeat(MAX_MESSAGE_LEN),
        };
        assert!(emoji_max.validate().is_ok());

        let too_long = CreateMessageRequest {
            content: "x".repeat(MAX_MESSAGE_LEN + 1),
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_channel_type_default() {
        let json = r#"{"name": "general"}"#;
        let request: CreateChannelRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.channel_type, "text");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_invite_defaults() {
        let json = "{}";
        let request: CreateInviteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.max_uses, 0);
        assert_eq!(request.max_age, 0);
    }
}

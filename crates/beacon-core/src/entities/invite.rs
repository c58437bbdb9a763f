//! Invite entity - an unguessable code redeemable for membership

use chrono::{DateTime, Duration, Utc};

use crate::value_objects::Snowflake;

/// Invite entity
///
/// Redemption creates a membership. The invite itself is not consumed
/// unless a use limit is configured; expiry and use limits default to
/// unlimited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invite {
    pub code: String,
    pub server_id: Snowflake,
    pub created_by: Snowflake,
    pub uses: i32,
    pub max_uses: Option<i32>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Invite {
    /// Create a new unlimited Invite
    pub fn new(code: String, server_id: Snowflake, created_by: Snowflake) -> Self {
        Self {
            code,
            server_id,
            created_by,
            uses: 0,
            max_uses: None,
            expires_at: None,
            created_at: Utc::now(),
        }
    }

    /// Limit the number of redemptions (0 means unlimited)
    pub fn with_max_uses(mut self, max_uses: i32) -> Self {
        if max_uses > 0 {
            self.max_uses = Some(max_uses);
        }
        self
    }

    /// Expire the invite after the given number of seconds (0 means never)
    pub fn with_max_age(mut self, max_age_seconds: i64) -> Self {
        if max_age_seconds > 0 {
            self.expires_at = Some(self.created_at + Duration::seconds(max_age_seconds));
        }
        self
    }

    /// Check if the invite is past its expiry
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Utc::now() > at)
    }

    /// Check if the invite has reached its use limit
    pub fn is_exhausted(&self) -> bool {
        self.max_uses.is_some_and(|max| self.uses >= max)
    }

    /// Check if the invite can still be redeemed
    pub fn is_redeemable(&self) -> bool {
        !self.is_expired() && !self.is_exhausted()
    }
}

/// Generate a random invite code
pub fn generate_invite_code() -> String {
    use rand::Rng;

    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const CODE_LEN: usize = 8;

    let mut rng = rand::thread_rng();
    (0..CODE_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

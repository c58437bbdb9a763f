//! Friend relationship - a social-graph edge with a small state machine
//!
//! One record per unordered user pair. The record itself is directional
//! (requester → target) so that a pending request can be projected as
//! outgoing for one side and incoming for the other.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::Snowflake;

/// Stored state of a friend link
///
/// `none` is represented by the absence of a record; decline deletes
/// the record, which makes it safely repeatable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendState {
    Pending,
    Accepted,
}

/// Role-relative status projected into a user's friend list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendStatus {
    Accepted,
    PendingOutgoing,
    PendingIncoming,
}

/// Friend link entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendLink {
    /// The user who sent the request
    pub requester_id: Snowflake,
    /// The user the request was addressed to
    pub target_id: Snowflake,
    pub state: FriendState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FriendLink {
    /// Create a new pending link from requester to target
    pub fn new_pending(requester_id: Snowflake, target_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            requester_id,
            target_id,
            state: FriendState::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether a user is one of the two parties
    #[inline]
    pub fn involves(&self, user_id: Snowflake) -> bool {
        self.requester_id == user_id || self.target_id == user_id
    }

    /// The party opposite to `user_id`
    ///
    /// Callers must ensure `user_id` is one of the two parties.
    pub fn other_party(&self, user_id: Snowflake) -> Snowflake {
        if self.requester_id == user_id {
            self.target_id
        } else {
            self.requester_id
        }
    }

    /// Project the stored state relative to one side of the pair
    pub fn status_for(&self, user_id: Snowflake) -> FriendStatus {
        match self.state {
            FriendState::Accepted => FriendStatus::Accepted,
            FriendState::Pending if self.requester_id == user_id => FriendStatus::PendingOutgoing,
            FriendState::Pending => FriendStatus::PendingIncoming,
        }
    }

    /// Transition pending → accepted, stamping `updated_at`
    pub fn accept(&mut self) {
        self.state = FriendState::Accepted;
        self.updated_at = Utc::now();
    }
}

//! Friend link table

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;

use beacon_core::{DomainError, FriendLink, FriendRepository, FriendState, Snowflake, StoreResult};

use super::{pair_key, MemoryStore};

#[async_trait]
impl FriendRepository for MemoryStore {
    async fn find_pair(&self, a: Snowflake, b: Snowflake) -> StoreResult<Option<FriendLink>> {
        Ok(self.friends.get(&pair_key(a, b)).map(|l| l.clone()))
    }

    async fn create(&self, link: &FriendLink) -> StoreResult<()> {
        match self.friends.entry(pair_key(link.requester_id, link.target_id)) {
            Entry::Occupied(existing) => match existing.get().state {
                FriendState::Accepted => Err(DomainError::AlreadyFriends),
                FriendState::Pending => Err(DomainError::AlreadyPending),
            },
            Entry::Vacant(slot) => {
                slot.insert(link.clone());
                Ok(())
            }
        }
    }

    async fn update(&self, link: &FriendLink) -> StoreResult<()> {
        match self
            .friends
            .get_mut(&pair_key(link.requester_id, link.target_id))
        {
            Some(mut existing) => {
                *existing = link.clone();
                Ok(())
            }
            None => Err(DomainError::NoSuchRequest),
        }
    }

    async fn delete_pair(&self, a: Snowflake, b: Snowflake) -> StoreResult<bool> {
        Ok(self.friends.remove(&pair_key(a, b)).is_some())
    }

    async fn find_by_user(&self, user_id: Snowflake) -> StoreResult<Vec<FriendLink>> {
        let mut links: Vec<FriendLink> = self
            .friends
            .iter()
            .filter(|entry| entry.involves(user_id))
            .map(|entry| entry.clone())
            .collect();
        links.sort_by_key(|l| l.created_at);
        Ok(links)
    }
}

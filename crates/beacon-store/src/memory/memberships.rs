//! Membership table

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;

use beacon_core::{DomainError, Membership, MembershipRepository, Snowflake, StoreResult};

use super::MemoryStore;

#[async_trait]
impl MembershipRepository for MemoryStore {
    async fn find(
        &self,
        server_id: Snowflake,
        user_id: Snowflake,
    ) -> StoreResult<Option<Membership>> {
        Ok(self.memberships.get(&(server_id, user_id)).map(|m| m.clone()))
    }

    async fn find_by_server(&self, server_id: Snowflake) -> StoreResult<Vec<Membership>> {
        let mut members: Vec<Membership> = self
            .memberships
            .iter()
            .filter(|entry| entry.key().0 == server_id)
            .map(|entry| entry.clone())
            .collect();
        members.sort_by_key(|m| (m.joined_at, m.user_id));
        Ok(members)
    }

    async fn find_by_user(&self, user_id: Snowflake) -> StoreResult<Vec<Membership>> {
        let mut memberships: Vec<Membership> = self
            .memberships
            .iter()
            .filter(|entry| entry.key().1 == user_id)
            .map(|entry| entry.clone())
            .collect();
        memberships.sort_by_key(|m| m.server_id);
        Ok(memberships)
    }

    async fn is_member(&self, server_id: Snowflake, user_id: Snowflake) -> StoreResult<bool> {
        Ok(self.memberships.contains_key(&(server_id, user_id)))
    }

    async fn create(&self, membership: &Membership) -> StoreResult<()> {
        // Entry guard makes this a compare-and-set: one winner per pair,
        // everyone else gets AlreadyMember.
        match self
            .memberships
            .entry((membership.server_id, membership.user_id))
        {
            Entry::Occupied(_) => Err(DomainError::AlreadyMember),
            Entry::Vacant(slot) => {
                slot.insert(membership.clone());
                Ok(())
            }
        }
    }

    async fn delete(&self, server_id: Snowflake, user_id: Snowflake) -> StoreResult<bool> {
        Ok(self.memberships.remove(&(server_id, user_id)).is_some())
    }
}

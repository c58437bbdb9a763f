//! Invite table

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;

use beacon_core::{DomainError, Invite, InviteRepository, Snowflake, StoreResult};

use super::MemoryStore;

#[async_trait]
impl InviteRepository for MemoryStore {
    async fn find_by_code(&self, code: &str) -> StoreResult<Option<Invite>> {
        Ok(self.invites.get(code).map(|i| i.clone()))
    }

    async fn find_by_server(&self, server_id: Snowflake) -> StoreResult<Vec<Invite>> {
        let mut invites: Vec<Invite> = self
            .invites
            .iter()
            .filter(|entry| entry.server_id == server_id)
            .map(|entry| entry.clone())
            .collect();
        invites.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.code.cmp(&b.code)));
        Ok(invites)
    }

    async fn create(&self, invite: &Invite) -> StoreResult<()> {
        match self.invites.entry(invite.code.clone()) {
            Entry::Occupied(_) => Err(DomainError::InviteCodeExists),
            Entry::Vacant(slot) => {
                slot.insert(invite.clone());
                Ok(())
            }
        }
    }

    async fn increment_uses(&self, code: &str) -> StoreResult<()> {
        match self.invites.get_mut(code) {
            Some(mut invite) => {
                invite.uses += 1;
                Ok(())
            }
            None => Err(DomainError::InviteNotFound(code.to_string())),
        }
    }

    async fn delete(&self, code: &str) -> StoreResult<()> {
        self.invites.remove(code);
        Ok(())
    }
}

//! User table

use async_trait::async_trait;

use beacon_core::{DomainError, Snowflake, StoreResult, User, UserRepository};

use super::MemoryStore;

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let id = self.emails.get(&email.to_lowercase()).map(|e| *e);
        match id {
            Some(id) => self.find_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn find_by_tag(&self, username: &str, discriminator: &str) -> StoreResult<Option<User>> {
        let key = (username.to_string(), discriminator.to_string());
        let id = self.tags.get(&key).map(|e| *e);
        match id {
            Some(id) => self.find_by_id(id).await,
            None => Ok(None),
        }
    }

    async fn create(&self, user: &User, password_hash: &str) -> StoreResult<()> {
        // The email and tag indexes are reserved together; the lock makes
        // the pair of inserts atomic with respect to other registrations.
        let _guard = self.registration.lock();

        let email_key = user.email.to_lowercase();
        if self.emails.contains_key(&email_key) {
            return Err(DomainError::EmailAlreadyExists);
        }
        let tag_key = (user.username.clone(), user.discriminator.clone());
        if self.tags.contains_key(&tag_key) {
            return Err(DomainError::TagAlreadyExists);
        }

        self.emails.insert(email_key, user.id);
        self.tags.insert(tag_key, user.id);
        self.users.insert(user.id, user.clone());
        self.password_hashes.insert(user.id, password_hash.to_string());
        Ok(())
    }

    async fn update(&self, user: &User) -> StoreResult<()> {
        match self.users.get_mut(&user.id) {
            Some(mut existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(DomainError::UserNotFound(user.id)),
        }
    }

    async fn password_hash(&self, id: Snowflake) -> StoreResult<Option<String>> {
        Ok(self.password_hashes.get(&id).map(|h| h.clone()))
    }

    async fn next_discriminator(&self, username: &str) -> StoreResult<String> {
        let _guard = self.registration.lock();
        for n in 1..10000 {
            let candidate = format!("{n:04}");
            if !self
                .tags
                .contains_key(&(username.to_string(), candidate.clone()))
            {
                return Ok(candidate);
            }
        }
        Err(DomainError::InvalidUsername(format!(
            "all tags taken for {username}"
        )))
    }
}

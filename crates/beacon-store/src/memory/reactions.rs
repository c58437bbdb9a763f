//! Reaction table

use async_trait::async_trait;

use beacon_core::{Reaction, ReactionRepository, Snowflake, StoreResult};

use super::MemoryStore;

#[async_trait]
impl ReactionRepository for MemoryStore {
    async fn add(&self, reaction: &Reaction) -> StoreResult<bool> {
        // The entry guard keeps the duplicate check and the append in
        // one atomic step per message.
        let mut rows = self.reactions.entry(reaction.message_id).or_default();
        let exists = rows
            .iter()
            .any(|r| r.user_id == reaction.user_id && r.emoji == reaction.emoji);
        if exists {
            return Ok(false);
        }
        rows.push(reaction.clone());
        Ok(true)
    }

    async fn remove(
        &self,
        message_id: Snowflake,
        user_id: Snowflake,
        emoji: &str,
    ) -> StoreResult<bool> {
        match self.reactions.get_mut(&message_id) {
            Some(mut rows) => {
                let before = rows.len();
                rows.retain(|r| !(r.user_id == user_id && r.emoji == emoji));
                Ok(rows.len() < before)
            }
            None => Ok(false),
        }
    }

    async fn find_by_message(&self, message_id: Snowflake) -> StoreResult<Vec<Reaction>> {
        Ok(self
            .reactions
            .get(&message_id)
            .map(|rows| rows.clone())
            .unwrap_or_default())
    }

    async fn delete_by_message(&self, message_id: Snowflake) -> StoreResult<()> {
        self.reactions.remove(&message_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn reaction(message: i64, user: i64, emoji: &str) -> Reaction {
        Reaction::new(Snowflake::new(message), Snowflake::new(user), emoji.to_string())
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let store = MemoryStore::new();

        assert!(store.add(&reaction(1, 10, "👍")).await.unwrap());
        assert!(!store.add(&reaction(1, 10, "👍")).await.unwrap());
        // Same user, different emoji is a separate row
        assert!(store.add(&reaction(1, 10, "🦀")).await.unwrap());

        assert_eq!(store.find_by_message(Snowflake::new(1)).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_same_reaction_single_insert() {
        let store = MemoryStore::new_shared();
        let inserted = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = Arc::clone(&store);
            let inserted = Arc::clone(&inserted);
            handles.push(tokio::spawn(async move {
                if store.add(&reaction(1, 10, "👍")).await.unwrap() {
                    inserted.fetch_add(1, Ordering::SeqCst);
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(inserted.load(Ordering::SeqCst), 1);
        assert_eq!(store.find_by_message(Snowflake::new(1)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = MemoryStore::new();
        store.add(&reaction(1, 10, "👍")).await.unwrap();

        assert!(store.remove(Snowflake::new(1), Snowflake::new(10), "👍").await.unwrap());
        assert!(!store.remove(Snowflake::new(1), Snowflake::new(10), "👍").await.unwrap());
        assert!(store.find_by_message(Snowflake::new(1)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_by_message() {
        let store = MemoryStore::new();
        store.add(&reaction(1, 10, "👍")).await.unwrap();
        store.add(&reaction(1, 11, "👍")).await.unwrap();

        store.delete_by_message(Snowflake::new(1)).await.unwrap();
        assert!(store.find_by_message(Snowflake::new(1)).await.unwrap().is_empty());
    }
}

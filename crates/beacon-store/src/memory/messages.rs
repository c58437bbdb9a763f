//! Message table

use async_trait::async_trait;

use beacon_core::{DomainError, Message, MessageQuery, MessageRepository, Snowflake, StoreResult};

use super::MemoryStore;

#[async_trait]
impl MessageRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<Message>> {
        Ok(self.messages.get(&id).map(|m| m.clone()))
    }

    async fn find_by_channel(
        &self,
        channel_id: Snowflake,
        query: MessageQuery,
    ) -> StoreResult<Vec<Message>> {
        // Cursors address messages by id. A cursor whose message has
        // been deleted no longer resolves and is ignored.
        let after_key = match query.after {
            Some(id) => self.messages.get(&id).map(|m| m.sort_key()),
            None => None,
        };
        let before_key = match query.before {
            Some(id) => self.messages.get(&id).map(|m| m.sort_key()),
            None => None,
        };

        let mut messages: Vec<Message> = self
            .messages
            .iter()
            .filter(|entry| entry.channel_id == channel_id)
            .map(|entry| entry.clone())
            .filter(|m| after_key.is_none_or(|key| m.sort_key() > key))
            .filter(|m| before_key.is_none_or(|key| m.sort_key() < key))
            .collect();

        messages.sort_by_key(Message::sort_key);
        if query.limit > 0 {
            messages.truncate(query.limit as usize);
        }
        Ok(messages)
    }

    async fn create(&self, message: &Message) -> StoreResult<()> {
        self.messages.insert(message.id, message.clone());
        Ok(())
    }

    async fn update(&self, message: &Message) -> StoreResult<()> {
        match self.messages.get_mut(&message.id) {
            Some(mut existing) => {
                *existing = message.clone();
                Ok(())
            }
            None => Err(DomainError::MessageNotFound(message.id)),
        }
    }

    async fn delete(&self, id: Snowflake) -> StoreResult<bool> {
        Ok(self.messages.remove(&id).is_some())
    }
}

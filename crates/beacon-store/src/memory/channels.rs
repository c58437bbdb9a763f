//! Channel table and DM pair index

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;

use beacon_core::{Channel, ChannelRepository, Snowflake, StoreResult};

use super::{pair_key, MemoryStore};

#[async_trait]
impl ChannelRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<Channel>> {
        Ok(self.channels.get(&id).map(|c| c.clone()))
    }

    async fn find_by_server(&self, server_id: Snowflake) -> StoreResult<Vec<Channel>> {
        let mut channels: Vec<Channel> = self
            .channels
            .iter()
            .filter(|entry| entry.server_id == Some(server_id))
            .map(|entry| entry.clone())
            .collect();
        channels.sort_by_key(|c| c.id);
        Ok(channels)
    }

    async fn create(&self, channel: &Channel) -> StoreResult<()> {
        self.channels.insert(channel.id, channel.clone());
        Ok(())
    }

    async fn find_dm(&self, a: Snowflake, b: Snowflake) -> StoreResult<Option<Channel>> {
        let id = self.dm_pairs.get(&pair_key(a, b)).map(|e| *e);
        Ok(id.and_then(|id| self.channels.get(&id).map(|c| c.clone())))
    }

    async fn open_dm(&self, channel: Channel, a: Snowflake, b: Snowflake) -> StoreResult<Channel> {
        let key = pair_key(a, b);
        // The entry guard holds the shard lock for this pair, so exactly
        // one concurrent caller creates the channel; the rest observe the
        // winner's channel id.
        match self.dm_pairs.entry(key) {
            Entry::Occupied(existing) => {
                let id = *existing.get();
                drop(existing);
                self.channels.get(&id).map(|c| c.clone()).ok_or_else(|| {
                    beacon_core::DomainError::InternalError(
                        "DM pair index points at a missing channel".to_string(),
                    )
                })
            }
            Entry::Vacant(slot) => {
                self.channels.insert(channel.id, channel.clone());
                self.dm_participants.insert(channel.id, key);
                slot.insert(channel.id);
                Ok(channel)
            }
        }
    }

    async fn dm_participants(
        &self,
        channel_id: Snowflake,
    ) -> StoreResult<Option<(Snowflake, Snowflake)>> {
        Ok(self.dm_participants.get(&channel_id).map(|p| *p))
    }

    async fn find_dms_by_user(&self, user_id: Snowflake) -> StoreResult<Vec<Channel>> {
        let mut channels: Vec<Channel> = self
            .dm_participants
            .iter()
            .filter(|entry| {
                let (a, b) = *entry.value();
                a == user_id || b == user_id
            })
            .filter_map(|entry| self.channels.get(entry.key()).map(|c| c.clone()))
            .collect();
        channels.sort_by_key(|c| c.id);
        Ok(channels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_core::ChannelType;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_server_channels_sorted() {
        let store = MemoryStore::new();
        let server = Snowflake::new(1);
        for id in [30, 10, 20] {
            let channel = Channel::new_server_channel(
                Snowflake::new(id),
                server,
                None,
                ChannelType::Text,
                format!("c{id}"),
                None,
            );
            ChannelRepository::create(&store, &channel).await.unwrap();
        }

        let channels = store.find_by_server(server).await.unwrap();
        let ids: Vec<i64> = channels.iter().map(|c| c.id.into_inner()).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[tokio::test]
    async fn test_open_dm_is_idempotent() {
        let store = MemoryStore::new();
        let a = Snowflake::new(1);
        let b = Snowflake::new(2);

        let first = store.open_dm(Channel::new_dm(Snowflake::new(100)), a, b).await.unwrap();
        // Second open with the reversed pair returns the first channel
        let second = store.open_dm(Channel::new_dm(Snowflake::new(200)), b, a).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(
            store.dm_participants(first.id).await.unwrap(),
            Some((a, b))
        );
        assert_eq!(store.find_dm(b, a).await.unwrap().unwrap().id, first.id);
    }

    #[tokio::test]
    async fn test_concurrent_open_dm_single_winner() {
        let store = MemoryStore::new_shared();
        let a = Snowflake::new(1);
        let b = Snowflake::new(2);

        let mut handles = Vec::new();
        for n in 0..16 {
            let store = Arc::clone(&store);
            // Alternate argument order to exercise pair normalization
            let (x, y) = if n % 2 == 0 { (a, b) } else { (b, a) };
            handles.push(tokio::spawn(async move {
                store
                    .open_dm(Channel::new_dm(Snowflake::new(1000 + n)), x, y)
                    .await
                    .unwrap()
                    .id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.dedup();
        assert_eq!(ids.len(), 1, "all callers must observe the same channel");
    }

    #[tokio::test]
    async fn test_find_dms_by_user() {
        let store = MemoryStore::new();
        let a = Snowflake::new(1);
        let b = Snowflake::new(2);
        let c = Snowflake::new(3);

        store.open_dm(Channel::new_dm(Snowflake::new(100)), a, b).await.unwrap();
        store.open_dm(Channel::new_dm(Snowflake::new(101)), a, c).await.unwrap();

        assert_eq!(store.find_dms_by_user(a).await.unwrap().len(), 2);
        assert_eq!(store.find_dms_by_user(b).await.unwrap().len(), 1);
        assert!(store.find_dms_by_user(Snowflake::new(9)).await.unwrap().is_empty());
    }
}

//! Server table

use async_trait::async_trait;

use beacon_core::{DomainError, Server, ServerRepository, Snowflake, StoreResult};

use super::MemoryStore;

#[async_trait]
impl ServerRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<Server>> {
        Ok(self.servers.get(&id).map(|s| s.clone()))
    }

    async fn find_by_member(&self, user_id: Snowflake) -> StoreResult<Vec<Server>> {
        let mut servers: Vec<Server> = self
            .memberships
            .iter()
            .filter(|entry| entry.key().1 == user_id)
            .filter_map(|entry| self.servers.get(&entry.key().0).map(|s| s.clone()))
            .collect();
        servers.sort_by_key(|s| s.id);
        Ok(servers)
    }

    async fn create(&self, server: &Server) -> StoreResult<()> {
        self.servers.insert(server.id, server.clone());
        Ok(())
    }

    async fn update(&self, server: &Server) -> StoreResult<()> {
        match self.servers.get_mut(&server.id) {
            Some(mut existing) => {
                *existing = server.clone();
                Ok(())
            }
            None => Err(DomainError::ServerNotFound(server.id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_core::{Membership, MembershipRepository};

    #[tokio::test]
    async fn test_create_and_update() {
        let store = MemoryStore::new();
        let mut server = Server::new(Snowflake::new(1), "lounge".to_string(), Snowflake::new(10));
        ServerRepository::create(&store, &server).await.unwrap();

        server.set_name("den".to_string());
        ServerRepository::update(&store, &server).await.unwrap();

        let found = ServerRepository::find_by_id(&store, server.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "den");
    }

    #[tokio::test]
    async fn test_find_by_member() {
        let store = MemoryStore::new();
        let user = Snowflake::new(10);
        for id in [1, 2, 3] {
            let server = Server::new(Snowflake::new(id), format!("s{id}"), user);
            ServerRepository::create(&store, &server).await.unwrap();
        }
        MembershipRepository::create(&store, &Membership::new(Snowflake::new(1), user))
            .await
            .unwrap();
        MembershipRepository::create(&store, &Membership::new(Snowflake::new(3), user))
            .await
            .unwrap();

        let servers = store.find_by_member(user).await.unwrap();
        let ids: Vec<i64> = servers.iter().map(|s| s.id.into_inner()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_update_missing_server() {
        let store = MemoryStore::new();
        let server = Server::new(Snowflake::new(9), "ghost".to_string(), Snowflake::new(1));
        assert!(matches!(
            store.update(&server).await,
            Err(DomainError::ServerNotFound(_))
        ));
    }
}

//! Category table

use async_trait::async_trait;

use beacon_core::{Category, CategoryRepository, Snowflake, StoreResult};

use super::MemoryStore;

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<Category>> {
        Ok(self.categories.get(&id).map(|c| c.clone()))
    }

    async fn find_by_server(&self, server_id: Snowflake) -> StoreResult<Vec<Category>> {
        let mut categories: Vec<Category> = self
            .categories
            .iter()
            .filter(|entry| entry.server_id == server_id)
            .map(|entry| entry.clone())
            .collect();
        categories.sort_by_key(|c| (c.position, c.id));
        Ok(categories)
    }

    async fn create(&self, category: &Category) -> StoreResult<()> {
        self.categories.insert(category.id, category.clone());
        Ok(())
    }
}

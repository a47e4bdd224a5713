/// PostgreSQL store
///
/// Thin adapter from the [`Store`] trait onto the model queries. All
/// referential rules live in the schema: ids come from `SERIAL` columns and
/// deleting a collection cascades to its tasks.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::{group_tasks, Store, StoreError, StoreResult};
use crate::db::pool::{close_pool, health_check};
use crate::models::collection::{Collection, CollectionWithTasks, CreateCollection};
use crate::models::task::{CreateTask, Task};

/// Store backed by a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        health_check(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        close_pool(self.pool.clone()).await;
    }

    async fn create_collection(&self, data: CreateCollection) -> StoreResult<Collection> {
        Ok(Collection::create(&self.pool, data).await?)
    }

    async fn find_collection(&self, id: i32, user_id: &str) -> StoreResult<Option<Collection>> {
        Ok(Collection::find_for_user(&self.pool, id, user_id).await?)
    }

    async fn delete_collection(
        &self,
        id: i32,
        user_id: &str,
    ) -> StoreResult<Option<Collection>> {
        Ok(Collection::delete_for_user(&self.pool, id, user_id).await?)
    }

    async fn list_collections(&self, user_id: &str) -> StoreResult<Vec<CollectionWithTasks>> {
        let collections = Collection::list_by_user(&self.pool, user_id).await?;
        let tasks = Task::list_by_user(&self.pool, user_id).await?;

        debug!(
            user_id,
            collections = collections.len(),
            tasks = tasks.len(),
            "Loaded collections"
        );

        Ok(group_tasks(collections, tasks))
    }

    async fn create_task(&self, data: CreateTask) -> StoreResult<Task> {
        let collection_id = data.collection_id;
        Task::create_for_user(&self.pool, data)
            .await?
            .ok_or(StoreError::InvalidReference(collection_id))
    }

    async fn find_task(&self, id: i32, user_id: &str) -> StoreResult<Option<Task>> {
        Ok(Task::find_for_user(&self.pool, id, user_id).await?)
    }

    async fn set_task_done(&self, id: i32, user_id: &str) -> StoreResult<Option<Task>> {
        Ok(Task::mark_done_for_user(&self.pool, id, user_id).await?)
    }
}

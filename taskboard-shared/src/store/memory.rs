/// In-memory store
///
/// Keeps collections and tasks in ordered maps behind one `RwLock`, so each
/// operation is atomic with respect to the others. Ids are generated from
/// per-table counters starting at 1. Deleting a collection removes its tasks
/// in the same critical section, mirroring `ON DELETE CASCADE`.
///
/// Data lives only as long as the process.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use super::{group_tasks, Store, StoreError, StoreResult};
use crate::models::collection::{Collection, CollectionWithTasks, CreateCollection};
use crate::models::task::{CreateTask, Task};

#[derive(Debug, Default)]
struct Tables {
    last_collection_id: i32,
    last_task_id: i32,
    collections: BTreeMap<i32, Collection>,
    tasks: BTreeMap<i32, Task>,
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of task rows, across all users
    pub async fn task_count(&self) -> usize {
        self.tables.read().await.tasks.len()
    }

    /// Total number of collection rows, across all users
    pub async fn collection_count(&self) -> usize {
        self.tables.read().await.collections.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_collection(&self, data: CreateCollection) -> StoreResult<Collection> {
        let mut tables = self.tables.write().await;
        tables.last_collection_id += 1;

        let collection = Collection {
            id: tables.last_collection_id,
            name: data.name,
            color: data.color,
            user_id: data.user_id,
            created_at: Utc::now(),
        };
        tables.collections.insert(collection.id, collection.clone());

        Ok(collection)
    }

    async fn find_collection(&self, id: i32, user_id: &str) -> StoreResult<Option<Collection>> {
        let tables = self.tables.read().await;
        Ok(tables
            .collections
            .get(&id)
            .filter(|collection| collection.user_id == user_id)
            .cloned())
    }

    async fn delete_collection(
        &self,
        id: i32,
        user_id: &str,
    ) -> StoreResult<Option<Collection>> {
        let mut tables = self.tables.write().await;

        let owned = tables
            .collections
            .get(&id)
            .is_some_and(|collection| collection.user_id == user_id);
        if !owned {
            return Ok(None);
        }

        let removed = tables.collections.remove(&id);
        let before = tables.tasks.len();
        tables.tasks.retain(|_, task| task.collection_id != id);
        debug!(
            collection_id = id,
            cascaded_tasks = before - tables.tasks.len(),
            "Cascaded collection delete"
        );

        Ok(removed)
    }

    async fn list_collections(&self, user_id: &str) -> StoreResult<Vec<CollectionWithTasks>> {
        let tables = self.tables.read().await;

        // BTreeMap iteration is by id, which is creation order here
        let collections: Vec<Collection> = tables
            .collections
            .values()
            .filter(|collection| collection.user_id == user_id)
            .cloned()
            .collect();
        let tasks: Vec<Task> = tables
            .tasks
            .values()
            .filter(|task| task.user_id == user_id)
            .cloned()
            .collect();

        Ok(group_tasks(collections, tasks))
    }

    async fn create_task(&self, data: CreateTask) -> StoreResult<Task> {
        let mut tables = self.tables.write().await;

        let owned = tables
            .collections
            .get(&data.collection_id)
            .is_some_and(|collection| collection.user_id == data.user_id);
        if !owned {
            return Err(StoreError::InvalidReference(data.collection_id));
        }

        tables.last_task_id += 1;
        let task = Task {
            id: tables.last_task_id,
            content: data.content,
            done: false,
            expires_at: data.expires_at,
            user_id: data.user_id,
            collection_id: data.collection_id,
            created_at: Utc::now(),
        };
        tables.tasks.insert(task.id, task.clone());

        Ok(task)
    }

    async fn find_task(&self, id: i32, user_id: &str) -> StoreResult<Option<Task>> {
        let tables = self.tables.read().await;
        Ok(tables
            .tasks
            .get(&id)
            .filter(|task| task.user_id == user_id)
            .cloned())
    }

    async fn set_task_done(&self, id: i32, user_id: &str) -> StoreResult<Option<Task>> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .tasks
            .get_mut(&id)
            .filter(|task| task.user_id == user_id)
            .map(|task| {
                task.done = true;
                task.clone()
            }))
    }
}

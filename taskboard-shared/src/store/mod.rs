/// Persistence gateway
///
/// The [`Store`] trait is the only way the actions touch persisted data. Every
/// method takes the owner id alongside the primary id, so ownership filtering is
/// part of the contract rather than something each caller remembers to do.
///
/// # Backends
///
/// - [`postgres::PgStore`]: PostgreSQL via sqlx; cascade and id generation are
///   enforced by the schema in `migrations/`
/// - [`memory::MemoryStore`]: in-process maps behind a single lock; cascade is
///   applied explicitly on delete
///
/// # Example
///
/// ```
/// use taskboard_shared::models::collection::CreateCollection;
/// use taskboard_shared::models::color::CollectionColor;
/// use taskboard_shared::store::{memory::MemoryStore, Store};
///
/// # async fn example() -> Result<(), taskboard_shared::store::StoreError> {
/// let store = MemoryStore::new();
/// let collection = store
///     .create_collection(CreateCollection {
///         name: "Work".to_string(),
///         color: CollectionColor::Sunset,
///         user_id: "user_1".to_string(),
///     })
///     .await?;
/// assert_eq!(collection.user_id, "user_1");
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::models::collection::{Collection, CollectionWithTasks, CreateCollection};
use crate::models::task::{CreateTask, Task};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A task referenced a collection that does not exist or is not owned by
    /// the same user
    #[error("Collection {0} does not exist")]
    InvalidReference(i32),

    /// The backing database failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Owner-scoped persistence operations for collections and tasks
///
/// "Not found" is reported as `Ok(None)`: the row is either missing or belongs
/// to someone else, and the two are indistinguishable to the caller.
#[async_trait]
pub trait Store: Send + Sync {
    /// Short backend name for logs and health output
    fn backend(&self) -> &'static str;

    /// Checks that the backend is reachable
    async fn ping(&self) -> StoreResult<()>;

    /// Releases backend resources on shutdown
    async fn close(&self) {}

    async fn create_collection(&self, data: CreateCollection) -> StoreResult<Collection>;

    async fn find_collection(&self, id: i32, user_id: &str) -> StoreResult<Option<Collection>>;

    /// Deletes the collection and, by cascade, all of its tasks
    async fn delete_collection(&self, id: i32, user_id: &str)
        -> StoreResult<Option<Collection>>;

    /// The user's collections (oldest first), each with its tasks ordered by id
    async fn list_collections(&self, user_id: &str) -> StoreResult<Vec<CollectionWithTasks>>;

    /// Fails with [`StoreError::InvalidReference`] unless `data.collection_id`
    /// names a collection owned by `data.user_id`
    async fn create_task(&self, data: CreateTask) -> StoreResult<Task>;

    async fn find_task(&self, id: i32, user_id: &str) -> StoreResult<Option<Task>>;

    /// Sets `done = true` unconditionally
    async fn set_task_done(&self, id: i32, user_id: &str) -> StoreResult<Option<Task>>;
}

/// Groups tasks under their collections, preserving the collections' order
pub(crate) fn group_tasks(
    collections: Vec<Collection>,
    tasks: Vec<Task>,
) -> Vec<CollectionWithTasks> {
    let mut grouped: Vec<CollectionWithTasks> = collections
        .into_iter()
        .map(|collection| CollectionWithTasks {
            collection,
            tasks: Vec::new(),
        })
        .collect();

    for task in tasks {
        if let Some(entry) = grouped
            .iter_mut()
            .find(|entry| entry.collection.id == task.collection_id)
        {
            entry.tasks.push(task);
        }
    }

    for entry in &mut grouped {
        entry.tasks.sort_by_key(|task| task.id);
    }

    grouped
}

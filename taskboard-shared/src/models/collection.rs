/// Collection model and database operations
///
/// A collection is a named, colored grouping of tasks owned by exactly one user.
/// Every query here is scoped by the owner id, so a caller can never read or
/// delete another user's collection.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE collections (
///     id SERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     color collection_color NOT NULL,
///     user_id VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Tasks reference collections with `ON DELETE CASCADE`, so deleting a
/// collection removes its tasks in the same statement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::color::CollectionColor;
use super::task::Task;

/// Collection row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Collection {
    /// Generated identifier
    pub id: i32,

    /// Display name (not unique)
    pub name: String,

    /// Palette key
    pub color: CollectionColor,

    /// Owning user (opaque identity provider id)
    pub user_id: String,

    /// When the collection was created
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCollection {
    pub name: String,
    pub color: CollectionColor,
    pub user_id: String,
}

/// Completion summary for a collection's tasks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Tasks marked done
    pub done: usize,

    /// All tasks in the collection
    pub total: usize,

    /// `done / total * 100`, or 0 for an empty collection
    pub percent: f64,
}

impl Progress {
    /// Computes progress over a slice of tasks
    pub fn of(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let done = tasks.iter().filter(|task| task.done).count();
        let percent = if total == 0 {
            0.0
        } else {
            done as f64 / total as f64 * 100.0
        };

        Self { done, total, percent }
    }
}

/// A collection together with its tasks, as shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionWithTasks {
    #[serde(flatten)]
    pub collection: Collection,

    /// Tasks ordered by id
    pub tasks: Vec<Task>,
}

impl CollectionWithTasks {
    pub fn progress(&self) -> Progress {
        Progress::of(&self.tasks)
    }
}

impl Collection {
    /// Inserts a collection owned by `data.user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    pub async fn create(pool: &PgPool, data: CreateCollection) -> Result<Self, sqlx::Error> {
        let collection = sqlx::query_as::<_, Collection>(
            r#"
            INSERT INTO collections (name, color, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, color, user_id, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.color)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(collection)
    }

    /// Finds a collection by id, only if owned by `user_id`
    pub async fn find_for_user(
        pool: &PgPool,
        id: i32,
        user_id: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let collection = sqlx::query_as::<_, Collection>(
            r#"
            SELECT id, name, color, user_id, created_at
            FROM collections
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(collection)
    }

    /// Lists the collections owned by `user_id`, oldest first
    pub async fn list_by_user(pool: &PgPool, user_id: &str) -> Result<Vec<Self>, sqlx::Error> {
        let collections = sqlx::query_as::<_, Collection>(
            r#"
            SELECT id, name, color, user_id, created_at
            FROM collections
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(collections)
    }

    /// Deletes a collection matched by `(id, user_id)`
    ///
    /// Returns the deleted row, or `None` when nothing matched. The foreign key
    /// on `tasks.collection_id` cascades the delete to the collection's tasks.
    pub async fn delete_for_user(
        pool: &PgPool,
        id: i32,
        user_id: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let collection = sqlx::query_as::<_, Collection>(
            r#"
            DELETE FROM collections
            WHERE id = $1 AND user_id = $2
            RETURNING id, name, color, user_id, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(collection)
    }
}

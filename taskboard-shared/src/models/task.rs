/// Task model and database operations
///
/// A task is a reminder item with text content, an optional expiry and a done
/// flag. It belongs to exactly one collection owned by the same user, and that
/// association never changes after creation.
///
/// # State Machine
///
/// ```text
/// pending → done
/// ```
///
/// The transition is one way; there is no operation that reverts a task.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id SERIAL PRIMARY KEY,
///     content TEXT NOT NULL,
///     done BOOLEAN NOT NULL DEFAULT FALSE,
///     expires_at TIMESTAMPTZ,
///     user_id VARCHAR(255) NOT NULL,
///     collection_id INTEGER NOT NULL REFERENCES collections(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Task row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Generated identifier
    pub id: i32,

    /// Reminder text (at least 5 characters)
    pub content: String,

    /// Whether the task has been completed
    pub done: bool,

    /// Optional expiry; past dates are accepted
    pub expires_at: Option<DateTime<Utc>>,

    /// Owning user
    pub user_id: String,

    /// Collection this task belongs to
    pub collection_id: i32,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub user_id: String,
    pub collection_id: i32,
    pub content: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// How close a task is to its expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryUrgency {
    /// No expiry set
    None,

    /// Expiry is in the past
    Expired,

    /// Expires within 3 days
    Imminent,

    /// Expires within 7 days
    Soon,

    /// Expires later than 7 days from now
    Later,
}

impl ExpiryUrgency {
    /// Classifies an optional expiry relative to `now`
    pub fn classify(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let Some(expires_at) = expires_at else {
            return ExpiryUrgency::None;
        };

        let remaining = expires_at - now;
        if remaining < Duration::zero() {
            ExpiryUrgency::Expired
        } else if remaining <= Duration::days(3) {
            ExpiryUrgency::Imminent
        } else if remaining <= Duration::days(7) {
            ExpiryUrgency::Soon
        } else {
            ExpiryUrgency::Later
        }
    }
}

impl Task {
    pub fn urgency(&self, now: DateTime<Utc>) -> ExpiryUrgency {
        ExpiryUrgency::classify(self.expires_at, now)
    }

    /// Inserts a task into a collection owned by `data.user_id`
    ///
    /// The row is selected from `collections` filtered by id and owner, so a
    /// missing or foreign collection inserts nothing and yields `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails.
    pub async fn create_for_user(
        pool: &PgPool,
        data: CreateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (content, expires_at, user_id, collection_id)
            SELECT $1, $2, c.user_id, c.id
            FROM collections c
            WHERE c.id = $3 AND c.user_id = $4
            RETURNING id, content, done, expires_at, user_id, collection_id, created_at
            "#,
        )
        .bind(data.content)
        .bind(data.expires_at)
        .bind(data.collection_id)
        .bind(data.user_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by id, only if owned by `user_id`
    pub async fn find_for_user(
        pool: &PgPool,
        id: i32,
        user_id: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, content, done, expires_at, user_id, collection_id, created_at
            FROM tasks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks owned by `user_id`, ordered by id
    pub async fn list_by_user(pool: &PgPool, user_id: &str) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, content, done, expires_at, user_id, collection_id, created_at
            FROM tasks
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Sets `done = true` on the task matched by `(id, user_id)`
    ///
    /// Unconditional, so repeating it on a done task is a harmless write.
    /// Returns `None` when nothing matched.
    pub async fn mark_done_for_user(
        pool: &PgPool,
        id: i32,
        user_id: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET done = TRUE
            WHERE id = $1 AND user_id = $2
            RETURNING id, content, done, expires_at, user_id, collection_id, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }
}

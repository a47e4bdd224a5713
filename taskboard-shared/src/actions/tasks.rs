use tracing::{info, warn};

use super::{ActionError, ActionResult};
use crate::auth::context::RequestContext;
use crate::models::task::{CreateTask, Task};
use crate::schemas::task::CreateTaskSchema;
use crate::store::Store;

/// Adds a task to one of the caller's collections
///
/// The task starts pending. An expiry in the past is accepted as is.
///
/// # Errors
///
/// - `Unauthenticated` without a caller
/// - `Validation` for content shorter than 5 characters or a negative collection id
/// - `InvalidReference` if the collection is missing or not owned by the caller
pub async fn create_task(
    store: &dyn Store,
    ctx: &RequestContext,
    input: CreateTaskSchema,
) -> ActionResult<Task> {
    let identity = ctx.require_identity()?;
    input.check().map_err(ActionError::Validation)?;

    let task = store
        .create_task(CreateTask {
            user_id: identity.user_id.clone(),
            collection_id: input.collection_id,
            content: input.content,
            expires_at: input.expires_at,
        })
        .await
        .inspect_err(|e| {
            warn!(collection_id = input.collection_id, error = %e, "Task creation failed");
        })?;

    info!(
        task_id = task.id,
        collection_id = task.collection_id,
        user_id = %identity.user_id,
        "Task created"
    );
    Ok(task)
}

/// Marks one of the caller's tasks as done
///
/// Idempotent: repeating it on a done task succeeds and leaves it done.
///
/// # Errors
///
/// - `Unauthenticated` without a caller
/// - `NotFound` if the id is unknown or belongs to another user
pub async fn set_task_to_done(
    store: &dyn Store,
    ctx: &RequestContext,
    id: i32,
) -> ActionResult<Task> {
    let identity = ctx.require_identity()?;

    let task = store
        .set_task_done(id, &identity.user_id)
        .await?
        .ok_or(ActionError::NotFound("Task"))?;

    info!(task_id = id, user_id = %identity.user_id, "Task marked done");
    Ok(task)
}

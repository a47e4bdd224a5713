/// Task endpoints
///
/// - `POST /v1/tasks` - Create task
/// - `POST /v1/tasks/:id/done` - Mark task done

use crate::{app::AppState, error::ApiResult, routes::guarded_body};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use taskboard_shared::{
    actions::tasks,
    auth::context::RequestContext,
    models::task::{ExpiryUrgency, Task},
    schemas::task::CreateTaskSchema,
};

/// Task as returned to clients, with its expiry urgency
#[derive(Debug, Serialize)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,

    pub urgency: ExpiryUrgency,
}

impl TaskView {
    pub fn new(task: Task, now: DateTime<Utc>) -> Self {
        let urgency = task.urgency(now);
        Self { task, urgency }
    }
}

/// Create task
///
/// # Endpoint
///
/// ```text
/// POST /v1/tasks
/// Authorization: Bearer <jwt_token>
/// Content-Type: application/json
///
/// {
///   "collection_id": 1,
///   "content": "Buy milk today",
///   "expires_at": "2025-06-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: No caller identity
/// - `400 Bad Request`: Body is not JSON
/// - `422 Unprocessable Entity`: Content too short, or collection not owned by caller
///   (also when the JSON does not fit the request shape)
pub async fn create_task(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<CreateTaskSchema>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TaskView>)> {
    let req = guarded_body(&ctx, payload)?;
    let task = tasks::create_task(state.store.as_ref(), &ctx, req).await?;

    Ok((StatusCode::CREATED, Json(TaskView::new(task, Utc::now()))))
}

/// Mark task done
///
/// Repeating the call on a done task returns it unchanged.
///
/// # Errors
///
/// - `401 Unauthorized`: No caller identity
/// - `404 Not Found`: Task missing or owned by someone else
pub async fn set_task_to_done(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<i32>,
) -> ApiResult<Json<TaskView>> {
    let task = tasks::set_task_to_done(state.store.as_ref(), &ctx, id).await?;

    Ok(Json(TaskView::new(task, Utc::now())))
}

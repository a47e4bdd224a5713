/// Collection endpoints
///
/// - `GET /v1/collections` - Dashboard listing (collections, tasks, progress)
/// - `POST /v1/collections` - Create collection
/// - `DELETE /v1/collections/:id` - Delete collection and its tasks

use crate::{
    app::AppState,
    error::ApiResult,
    routes::{guarded_body, tasks::TaskView},
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use serde::Serialize;
use taskboard_shared::{
    actions::collections,
    auth::context::RequestContext,
    models::collection::{Collection, Progress},
    schemas::collection::CreateCollectionSchema,
};

/// Collection with its tasks and completion summary
#[derive(Debug, Serialize)]
pub struct CollectionView {
    #[serde(flatten)]
    pub collection: Collection,

    /// Style token for the collection's color
    pub style: &'static str,

    pub tasks: Vec<TaskView>,

    pub progress: Progress,
}

/// Dashboard response
#[derive(Debug, Serialize)]
pub struct ListCollectionsResponse {
    pub collections: Vec<CollectionView>,
}

/// List collections
///
/// # Response
///
/// ```json
/// {
///   "collections": [
///     {
///       "id": 1,
///       "name": "Work",
///       "color": "sunset",
///       "user_id": "user_2abc",
///       "created_at": "2025-01-03T12:00:00Z",
///       "style": "bg-gradient-to-r from-red-500 to-orange-500",
///       "tasks": [],
///       "progress": { "done": 0, "total": 0, "percent": 0.0 }
///     }
///   ]
/// }
/// ```
pub async fn list_collections(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> ApiResult<Json<ListCollectionsResponse>> {
    let now = Utc::now();
    let collections = collections::list_collections(state.store.as_ref(), &ctx)
        .await?
        .into_iter()
        .map(|entry| {
            let progress = entry.progress();
            CollectionView {
                style: entry.collection.color.style(),
                collection: entry.collection,
                tasks: entry
                    .tasks
                    .into_iter()
                    .map(|task| TaskView::new(task, now))
                    .collect(),
                progress,
            }
        })
        .collect();

    Ok(Json(ListCollectionsResponse { collections }))
}

/// Create collection
///
/// # Endpoint
///
/// ```text
/// POST /v1/collections
/// Authorization: Bearer <jwt_token>
/// Content-Type: application/json
///
/// { "name": "Work", "color": "sunset" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: No caller identity
/// - `400 Bad Request`: Body is not JSON
/// - `422 Unprocessable Entity`: Empty name or unknown color
///   (also when the JSON does not fit the request shape)
pub async fn create_collection(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<CreateCollectionSchema>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Collection>)> {
    let req = guarded_body(&ctx, payload)?;
    let collection = collections::create_collection(state.store.as_ref(), &ctx, req).await?;

    Ok((StatusCode::CREATED, Json(collection)))
}

/// Delete collection
///
/// Returns the deleted collection. Its tasks are removed with it.
///
/// # Errors
///
/// - `401 Unauthorized`: No caller identity
/// - `404 Not Found`: Collection missing or owned by someone else
pub async fn delete_collection(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Collection>> {
    let collection = collections::delete_collection(state.store.as_ref(), &ctx, id).await?;

    Ok(Json(collection))
}

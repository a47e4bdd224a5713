/// Caller identity endpoint
///
/// Backs the dashboard's welcome message.
///
/// ```text
/// GET /v1/me
/// Authorization: Bearer <jwt_token>
/// ```

use crate::error::{ApiError, ApiResult};
use axum::{Extension, Json};
use serde::Serialize;
use taskboard_shared::{actions::ActionError, auth::context::RequestContext};

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_id: String,
    pub display_name: Option<String>,
}

/// Returns the authenticated caller
///
/// # Errors
///
/// - `401 Unauthorized`: no bearer token
pub async fn me(Extension(ctx): Extension<RequestContext>) -> ApiResult<Json<MeResponse>> {
    let identity = ctx
        .require_identity()
        .map_err(|e| ApiError::from(ActionError::from(e)))?;

    Ok(Json(MeResponse {
        user_id: identity.user_id.clone(),
        display_name: identity.display_name.clone(),
    }))
}

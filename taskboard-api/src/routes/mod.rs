/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `identity`: Caller identity
/// - `palette`: Collection colors
/// - `collections`: Dashboard listing, create and delete
/// - `tasks`: Create and mark done

pub mod collections;
pub mod health;
pub mod identity;
pub mod palette;
pub mod tasks;

use crate::error::ApiResult;
use axum::{extract::rejection::JsonRejection, Json};
use taskboard_shared::{actions::ActionError, auth::context::RequestContext};

/// Unwraps a JSON body for a write endpoint
///
/// The caller is checked before the body, so an anonymous request is a 401
/// whatever it sent.
pub(crate) fn guarded_body<T>(
    ctx: &RequestContext,
    payload: Result<Json<T>, JsonRejection>,
) -> ApiResult<T> {
    ctx.require_identity().map_err(ActionError::from)?;
    let Json(body) = payload?;
    Ok(body)
}

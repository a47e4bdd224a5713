use tracing::{debug, info, warn};

use super::{ActionError, ActionResult};
use crate::auth::context::RequestContext;
use crate::models::collection::{Collection, CollectionWithTasks, CreateCollection};
use crate::schemas::collection::CreateCollectionSchema;
use crate::store::Store;

/// Creates a collection owned by the caller
///
/// Names need not be unique.
///
/// # Errors
///
/// - `Unauthenticated` without a caller
/// - `Validation` for an empty name or a color outside the palette
pub async fn create_collection(
    store: &dyn Store,
    ctx: &RequestContext,
    input: CreateCollectionSchema,
) -> ActionResult<Collection> {
    let identity = ctx.require_identity()?;
    let valid = input.parse().map_err(ActionError::Validation)?;

    let collection = store
        .create_collection(CreateCollection {
            name: valid.name,
            color: valid.color,
            user_id: identity.user_id.clone(),
        })
        .await?;

    info!(
        collection_id = collection.id,
        user_id = %identity.user_id,
        color = %collection.color,
        "Collection created"
    );
    Ok(collection)
}

/// Deletes one of the caller's collections together with its tasks
///
/// # Errors
///
/// - `Unauthenticated` without a caller
/// - `NotFound` if the id is unknown or belongs to another user; nothing is deleted
pub async fn delete_collection(
    store: &dyn Store,
    ctx: &RequestContext,
    id: i32,
) -> ActionResult<Collection> {
    let identity = ctx.require_identity()?;

    match store.delete_collection(id, &identity.user_id).await? {
        Some(collection) => {
            info!(collection_id = id, user_id = %identity.user_id, "Collection deleted");
            Ok(collection)
        }
        None => {
            warn!(collection_id = id, user_id = %identity.user_id, "Collection to delete not found");
            Err(ActionError::NotFound("Collection"))
        }
    }
}

/// Lists the caller's collections with their tasks (dashboard)
pub async fn list_collections(
    store: &dyn Store,
    ctx: &RequestContext,
) -> ActionResult<Vec<CollectionWithTasks>> {
    let identity = ctx.require_identity()?;
    let collections = store.list_collections(&identity.user_id).await?;

    debug!(user_id = %identity.user_id, count = collections.len(), "Listed collections");
    Ok(collections)
}

/// Board operations
///
/// Each operation takes the store, the caller's [`RequestContext`] and plain
/// input, and follows the same order:
///
/// ```text
/// require_identity ─► validate input ─► one store call ─► record
/// ```
///
/// An unauthenticated caller fails at the first step, and invalid input at the
/// second, so neither ever reaches the store.
///
/// # Operations
///
/// - [`collections::create_collection`]
/// - [`collections::delete_collection`]
/// - [`collections::list_collections`]
/// - [`tasks::create_task`]
/// - [`tasks::set_task_to_done`]
///
/// [`RequestContext`]: crate::auth::context::RequestContext

pub mod collections;
pub mod tasks;

use crate::auth::context::Unauthenticated;
use crate::schemas::FieldError;
use crate::store::StoreError;

/// Error type for board operations
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// No caller identity on the request
    #[error("User not found")]
    Unauthenticated,

    /// Input violated a schema rule
    #[error("Validation failed: {} errors", .0.len())]
    Validation(Vec<FieldError>),

    /// Target row is missing or owned by someone else
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Task referenced a collection the caller does not own
    #[error("Collection {0} does not exist")]
    InvalidReference(i32),

    /// Persistence failure
    #[error(transparent)]
    Store(StoreError),
}

/// Action result type alias
pub type ActionResult<T> = Result<T, ActionError>;

impl From<Unauthenticated> for ActionError {
    fn from(_: Unauthenticated) -> Self {
        ActionError::Unauthenticated
    }
}

impl From<StoreError> for ActionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidReference(id) => ActionError::InvalidReference(id),
            other => ActionError::Store(other),
        }
    }
}

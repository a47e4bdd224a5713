/// Caller identity passed explicitly into every operation
///
/// A [`RequestContext`] is built once per request by the identity middleware
/// and handed to the actions as an ordinary argument. Operations call
/// [`RequestContext::require_identity`] before touching input or storage, which
/// is the single authentication guard for all writes.
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::context::{Identity, RequestContext};
///
/// let anonymous = RequestContext::anonymous();
/// assert!(anonymous.require_identity().is_err());
///
/// let ctx = RequestContext::authenticated(Identity::new("user_1", None));
/// assert_eq!(ctx.require_identity().unwrap().user_id, "user_1");
/// ```

use serde::{Deserialize, Serialize};

use super::jwt::Claims;

/// Longest user id the owner columns hold (`VARCHAR(255)`)
pub const MAX_USER_ID_LEN: usize = 255;

/// An authenticated user as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque user id; the owner key on every row
    pub user_id: String,

    /// Display name, when the provider supplies one
    pub display_name: Option<String>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name,
        }
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            display_name: claims.name,
        }
    }
}

/// Raised by the guard when no identity is present
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("User not found")]
pub struct Unauthenticated;

/// Per-request capability carrying the (optional) caller identity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    identity: Option<Identity>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Returns the caller, or fails when the request carried no identity
    pub fn require_identity(&self) -> Result<&Identity, Unauthenticated> {
        self.identity.as_ref().ok_or(Unauthenticated)
    }
}

/// Bearer token resolution for Axum requests
///
/// [`resolve_identity`] turns the `Authorization` header into an optional
/// [`Identity`]. A request without the header is anonymous, not an error: the
/// operations decide whether they need a caller. A header that is present but
/// malformed or carries an invalid token is rejected with 401.

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use super::context::{Identity, RequestContext, MAX_USER_ID_LEN};
use super::jwt::{validate_token, JwtError};

/// Token verification settings
#[derive(Debug, Clone)]
pub struct TokenSettings {
    /// Shared HS256 secret
    pub secret: String,

    /// Expected `iss` claim; unchecked when `None`
    pub issuer: Option<String>,
}

/// Error type for identity resolution
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Authorization header is not `Bearer <token>`
    #[error("{0}")]
    InvalidFormat(String),

    /// Token validation failed
    #[error("{0}")]
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::InvalidFormat(msg) | AuthError::InvalidToken(msg) => {
                (StatusCode::UNAUTHORIZED, msg).into_response()
            }
        }
    }
}

/// Resolves the caller from request headers
///
/// # Errors
///
/// - `InvalidFormat` if the header is not valid UTF-8 or lacks the `Bearer ` prefix
/// - `InvalidToken` if the token fails validation, or its subject is empty or
///   longer than [`MAX_USER_ID_LEN`]
pub fn resolve_identity(
    headers: &HeaderMap,
    settings: &TokenSettings,
) -> Result<Option<Identity>, AuthError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidFormat("Authorization header is not valid text".to_string()))?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_token(token, &settings.secret, settings.issuer.as_deref()).map_err(
        |e| match e {
            JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
            JwtError::InvalidIssuer { .. } => AuthError::InvalidToken("Invalid issuer".to_string()),
            _ => AuthError::InvalidToken(format!("Invalid token: {}", e)),
        },
    )?;

    let sub_len = claims.sub.chars().count();
    if sub_len == 0 || sub_len > MAX_USER_ID_LEN {
        return Err(AuthError::InvalidToken("Invalid token subject".to_string()));
    }

    Ok(Some(Identity::from(claims)))
}

/// Builds the request context for a set of headers
pub fn request_context(
    headers: &HeaderMap,
    settings: &TokenSettings,
) -> Result<RequestContext, AuthError> {
    Ok(match resolve_identity(headers, settings)? {
        Some(identity) => RequestContext::authenticated(identity),
        None => RequestContext::anonymous(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::{create_token, Claims};
    use axum::http::HeaderValue;

    fn settings() -> TokenSettings {
        TokenSettings {
            secret: "test-secret-key-at-least-32-bytes-long".to_string(),
            issuer: Some("taskboard".to_string()),
        }
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_missing_header_is_anonymous() {
        let ctx = request_context(&HeaderMap::new(), &settings()).unwrap();
        assert!(ctx.identity().is_none());
    }

    #[test]
    fn test_valid_bearer_token() {
        let settings = settings();
        let claims = Claims::new("user_1", Some("Ada".to_string()), "taskboard");
        let token = create_token(&claims, &settings.secret).unwrap();

        let identity = resolve_identity(&headers_with(&format!("Bearer {}", token)), &settings)
            .unwrap()
            .unwrap();
        assert_eq!(identity, Identity::new("user_1", Some("Ada".to_string())));
    }

    #[test]
    fn test_non_bearer_scheme() {
        let err = resolve_identity(&headers_with("Basic dXNlcjpwYXNz"), &settings()).unwrap_err();
        assert!(matches!(err, AuthError::InvalidFormat(_)));
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_invalid_token() {
        let err = resolve_identity(&headers_with("Bearer nope"), &settings()).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    fn bearer_for(sub: &str) -> HeaderMap {
        let settings = settings();
        let claims = Claims::new(sub, None, "taskboard");
        let token = create_token(&claims, &settings.secret).unwrap();
        headers_with(&format!("Bearer {}", token))
    }

    #[test]
    fn test_empty_subject_rejected() {
        let err = resolve_identity(&bearer_for(""), &settings()).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn test_subject_length_limit() {
        let longest = "u".repeat(MAX_USER_ID_LEN);
        let identity = resolve_identity(&bearer_for(&longest), &settings())
            .unwrap()
            .unwrap();
        assert_eq!(identity.user_id.len(), MAX_USER_ID_LEN);

        let too_long = "u".repeat(MAX_USER_ID_LEN + 1);
        let err = resolve_identity(&bearer_for(&too_long), &settings()).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }
}

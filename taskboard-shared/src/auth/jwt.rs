/// JWT validation for identity provider tokens
///
/// The identity provider signs bearer tokens with HS256 using a secret shared
/// with this service. A token carries the opaque user id in `sub` and, when the
/// provider knows it, a display name in `name`.
///
/// # Validation
///
/// - Signature (HS256)
/// - Expiration (`exp`, required)
/// - Issuer (`iss`), only when an expected issuer is configured
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::jwt::{create_token, validate_token, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "a-shared-secret-that-is-at-least-32-bytes";
/// let claims = Claims::new("user_2abc", Some("Ada Lovelace".to_string()), "taskboard");
/// let token = create_token(&claims, secret)?;
///
/// let validated = validate_token(&token, secret, Some("taskboard"))?;
/// assert_eq!(validated.sub, "user_2abc");
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Signature or claim validation failed
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Token was issued by someone else
    #[error("Invalid issuer: expected {expected}")]
    InvalidIssuer { expected: String },
}

/// Default lifetime of tokens minted by [`Claims::new`]
pub const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 24;

/// Token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - opaque user id assigned by the identity provider
    pub sub: String,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Claims valid for [`DEFAULT_TOKEN_LIFETIME_HOURS`]
    pub fn new(sub: impl Into<String>, name: Option<String>, issuer: impl Into<String>) -> Self {
        Self::with_expiration(sub, name, issuer, Duration::hours(DEFAULT_TOKEN_LIFETIME_HOURS))
    }

    /// Claims with a custom lifetime (negative values produce expired claims)
    pub fn with_expiration(
        sub: impl Into<String>,
        name: Option<String>,
        issuer: impl Into<String>,
        expires_in: Duration,
    ) -> Self {
        let now = Utc::now();

        Self {
            sub: sub.into(),
            name,
            iss: issuer.into(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
        }
    }
}

/// Signs claims with HS256
///
/// # Errors
///
/// Returns `JwtError::CreateError` if encoding fails.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::new(Algorithm::HS256), claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Verifies a token and returns its claims
///
/// `issuer` is checked only when `Some`.
///
/// # Errors
///
/// Returns an error if the signature is invalid, the token has expired, the
/// issuer does not match, or the token is malformed.
pub fn validate_token(token: &str, secret: &str, issuer: Option<&str>) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    if let Some(issuer) = issuer {
        validation.set_issuer(&[issuer]);
    }

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer {
            expected: issuer.unwrap_or_default().to_string(),
        },
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

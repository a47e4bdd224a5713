/// Authentication utilities
///
/// Users are managed by an external identity provider. This module only
/// verifies the tokens it issues and carries the result through a request.
///
/// # Modules
///
/// - [`jwt`]: HS256 token creation and validation
/// - [`context`]: `Identity`, `RequestContext` and the authentication guard
/// - [`middleware`]: resolving the caller from `Authorization` headers

pub mod context;
pub mod jwt;
pub mod middleware;

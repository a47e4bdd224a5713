/// Middleware modules for the API server
///
/// Identity resolution lives in `app.rs`, next to the router it guards.
///
/// - `security`: Security response headers

pub mod security;

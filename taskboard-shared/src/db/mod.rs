/// Database layer for Taskboard
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with health checks
/// - `migrations`: embedded schema migrations
///
/// Row types and their queries are in the `models` module.

pub mod migrations;
pub mod pool;

/// Database models for Taskboard
///
/// # Models
///
/// - `color`: the fixed collection palette
/// - `collection`: color-coded task groupings, plus the dashboard view
/// - `task`: reminder items and their expiry classification
///
/// Every query is scoped by the owning user id.

pub mod collection;
pub mod color;
pub mod task;

//! # Taskboard Shared Library
//!
//! Domain types and operations for Taskboard, a personal task manager where
//! users group reminders into color-coded collections.
//!
//! ## Module Organization
//!
//! - `models`: collections, tasks and the color palette
//! - `schemas`: input validation rules
//! - `store`: owner-scoped persistence gateway (PostgreSQL and in-memory)
//! - `auth`: token validation and the per-request caller context
//! - `actions`: the board operations invoked by the API
//! - `db`: connection pool and migrations

pub mod actions;
pub mod auth;
pub mod db;
pub mod models;
pub mod schemas;
pub mod store;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! # Taskboard API Server Library
//!
//! HTTP surface of Taskboard: identity resolution, collection and task
//! endpoints, and the dashboard listing.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Security headers
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;

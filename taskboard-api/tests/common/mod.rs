//! Common test utilities for integration tests
//!
//! Builds the full router over an in-memory store so the HTTP surface can be
//! exercised without PostgreSQL, plus helpers for minting tokens and sending
//! JSON requests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::Config;
use taskboard_shared::auth::jwt::{create_token, Claims};
use taskboard_shared::store::memory::MemoryStore;
use tower::Service as _;

pub const SECRET: &str = "integration-test-secret-at-least-32-bytes";
pub const ISSUER: &str = "taskboard";

/// Test context containing the router and its backing store
pub struct TestContext {
    pub app: axum::Router,
    pub store: Arc<MemoryStore>,
    pub config: Config,
}

impl TestContext {
    pub fn new() -> Self {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("STORAGE_BACKEND", "memory"),
            ("JWT_SECRET", SECRET),
            ("JWT_ISSUER", ISSUER),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
            .expect("test configuration");

        let store = Arc::new(MemoryStore::new());
        let app = build_router(AppState::new(store.clone(), config.clone()));

        Self { app, store, config }
    }

    /// Bearer header value for `user_id`
    pub fn auth_header(&self, user_id: &str) -> String {
        let claims = Claims::new(user_id, Some(format!("{} display", user_id)), ISSUER);
        format!("Bearer {}", create_token(&claims, SECRET).expect("token"))
    }

    /// Sends a request and returns the status with the decoded JSON body
    /// (`Value::Null` for an empty body)
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        user_id: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(user_id) = user_id {
            builder = builder.header(header::AUTHORIZATION, self.auth_header(user_id));
        }

        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.send_request(builder.body(body).unwrap()).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, json)
    }
}

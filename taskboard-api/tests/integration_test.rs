/// Integration tests for the Taskboard API
///
/// These drive the full router (identity layer, handlers, error mapping,
/// response headers) against the in-memory store:
/// - Anonymous and malformed credentials
/// - Collection lifecycle including cascade delete
/// - Task creation, validation and ownership
/// - Dashboard listing with progress and urgency

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{Duration, Utc};
use common::TestContext;
use serde_json::json;

#[tokio::test]
async fn test_health_reports_memory_backend() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send("GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "memory");
    assert_eq!(body["storage_status"], "connected");
}

#[tokio::test]
async fn test_anonymous_writes_are_rejected_without_side_effects() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send(
            "POST",
            "/v1/collections",
            None,
            Some(json!({ "name": "Work", "color": "sunset" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
    assert_eq!(body["message"], "User not found");

    let (status, _) = ctx
        .send(
            "POST",
            "/v1/tasks",
            None,
            Some(json!({ "collection_id": 1, "content": "Buy milk today" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = ctx.send("DELETE", "/v1/collections/1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = ctx.send("POST", "/v1/tasks/1/done", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert_eq!(ctx.store.collection_count().await, 0);
    assert_eq!(ctx.store.task_count().await, 0);
}

#[tokio::test]
async fn test_malformed_authorization_header() {
    let ctx = TestContext::new();

    let request = Request::builder()
        .uri("/v1/me")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();
    let (status, body) = ctx.send_request(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    let request = Request::builder()
        .uri("/v1/me")
        .header(header::AUTHORIZATION, "Bearer not-a-jwt")
        .body(Body::empty())
        .unwrap();
    let (status, _) = ctx.send_request(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_identity() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send("GET", "/v1/me", Some("user_ada"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "user_ada");
    assert_eq!(body["display_name"], "user_ada display");

    let (status, _) = ctx.send("GET", "/v1/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_colors_lists_palette_in_order() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send("GET", "/v1/colors", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let keys: Vec<&str> = body["colors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["key"].as_str().unwrap())
        .collect();
    assert_eq!(
        keys,
        ["sunset", "poppy", "rosebud", "snowflake", "candy", "firtree", "metal", "powder"]
    );
}

#[tokio::test]
async fn test_full_board_lifecycle() {
    let ctx = TestContext::new();
    let user = Some("user_ada");

    let (status, collection) = ctx
        .send(
            "POST",
            "/v1/collections",
            user,
            Some(json!({ "name": "Work", "color": "sunset" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(collection["name"], "Work");
    assert_eq!(collection["color"], "sunset");
    assert_eq!(collection["user_id"], "user_ada");
    let collection_id = collection["id"].as_i64().unwrap();

    let (status, task) = ctx
        .send(
            "POST",
            "/v1/tasks",
            user,
            Some(json!({ "collection_id": collection_id, "content": "Buy milk today" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["done"], false);
    assert_eq!(task["collection_id"], collection_id);
    assert_eq!(task["urgency"], "none");
    assert!(task["expires_at"].is_null());
    let task_id = task["id"].as_i64().unwrap();

    let (status, task) = ctx
        .send("POST", &format!("/v1/tasks/{}/done", task_id), user, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(task["done"], true);

    let (status, deleted) = ctx
        .send("DELETE", &format!("/v1/collections/{}", collection_id), user, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], collection_id);

    assert_eq!(ctx.store.collection_count().await, 0);
    assert_eq!(ctx.store.task_count().await, 0);

    let (status, _) = ctx
        .send("POST", &format!("/v1/tasks/{}/done", task_id), user, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_input_returns_field_errors() {
    let ctx = TestContext::new();
    let user = Some("user_ada");

    let (status, body) = ctx
        .send(
            "POST",
            "/v1/collections",
            user,
            Some(json!({ "name": "Work", "color": "teal" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"][0]["field"], "color");

    let (_, collection) = ctx
        .send(
            "POST",
            "/v1/collections",
            user,
            Some(json!({ "name": "Home", "color": "powder" })),
        )
        .await;

    let (status, body) = ctx
        .send(
            "POST",
            "/v1/tasks",
            user,
            Some(json!({ "collection_id": collection["id"], "content": "Milk" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "content");
    assert_eq!(
        body["details"][0]["message"],
        "Task content must be at least 5 characters long"
    );

    assert_eq!(ctx.store.task_count().await, 0);
}

#[tokio::test]
async fn test_other_users_collections_are_invisible() {
    let ctx = TestContext::new();

    let (_, collection) = ctx
        .send(
            "POST",
            "/v1/collections",
            Some("user_ada"),
            Some(json!({ "name": "Private", "color": "metal" })),
        )
        .await;
    let collection_id = collection["id"].as_i64().unwrap();

    let (status, body) = ctx
        .send(
            "POST",
            "/v1/tasks",
            Some("user_bob"),
            Some(json!({ "collection_id": collection_id, "content": "Sneaky task" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "collection_id");

    let (status, _) = ctx
        .send(
            "DELETE",
            &format!("/v1/collections/{}", collection_id),
            Some("user_bob"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, board) = ctx.send("GET", "/v1/collections", Some("user_bob"), None).await;
    assert_eq!(board["collections"].as_array().unwrap().len(), 0);

    assert_eq!(ctx.store.collection_count().await, 1);
}

#[tokio::test]
async fn test_dashboard_reports_progress_and_urgency() {
    let ctx = TestContext::new();
    let user = Some("user_ada");

    let (_, collection) = ctx
        .send(
            "POST",
            "/v1/collections",
            user,
            Some(json!({ "name": "Errands", "color": "firtree" })),
        )
        .await;
    let collection_id = collection["id"].clone();

    let tomorrow = Utc::now() + Duration::days(1);
    let yesterday = Utc::now() - Duration::days(1);

    let (_, first) = ctx
        .send(
            "POST",
            "/v1/tasks",
            user,
            Some(json!({
                "collection_id": collection_id,
                "content": "Pick up parcel",
                "expires_at": tomorrow.to_rfc3339(),
            })),
        )
        .await;
    assert_eq!(first["urgency"], "imminent");

    let (status, second) = ctx
        .send(
            "POST",
            "/v1/tasks",
            user,
            Some(json!({
                "collection_id": collection_id,
                "content": "Return library books",
                "expires_at": yesterday.to_rfc3339(),
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["urgency"], "expired");

    ctx.send("POST", &format!("/v1/tasks/{}/done", first["id"]), user, None)
        .await;

    let (status, board) = ctx.send("GET", "/v1/collections", user, None).await;
    assert_eq!(status, StatusCode::OK);

    let entry = &board["collections"][0];
    assert_eq!(entry["name"], "Errands");
    assert!(entry["style"].as_str().unwrap().contains("emerald"));
    assert_eq!(entry["tasks"].as_array().unwrap().len(), 2);
    assert_eq!(entry["progress"]["done"], 1);
    assert_eq!(entry["progress"]["total"], 2);
    assert_eq!(entry["progress"]["percent"], 50.0);
}

#[tokio::test]
async fn test_security_headers_on_api_responses() {
    let ctx = TestContext::new();

    let response = {
        use tower::Service as _;
        ctx.app
            .clone()
            .call(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap()
    };

    let headers = response.headers();
    assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
    assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "no-store");
}

#[tokio::test]
async fn test_anonymous_write_with_bad_body_is_unauthorized() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send("POST", "/v1/collections", None, Some(json!({ "name": "Work" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    let request = Request::builder()
        .method("POST")
        .uri("/v1/tasks")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = ctx.send_request(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert_eq!(ctx.store.collection_count().await, 0);
}

#[tokio::test]
async fn test_body_rejections_use_error_envelope() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send("POST", "/v1/tasks", Some("user_ada"), Some(json!({ "content": "Buy milk today" })))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"][0]["field"], "body");
    assert!(body["details"][0]["message"]
        .as_str()
        .unwrap()
        .contains("collection_id"));

    let request = Request::builder()
        .method("POST")
        .uri("/v1/collections")
        .header(header::AUTHORIZATION, ctx.auth_header("user_ada"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = ctx.send_request(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_collection_name_length_limit() {
    let ctx = TestContext::new();
    let user = Some("user_ada");

    let (status, _) = ctx
        .send(
            "POST",
            "/v1/collections",
            user,
            Some(json!({ "name": "n".repeat(255), "color": "candy" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = ctx
        .send(
            "POST",
            "/v1/collections",
            user,
            Some(json!({ "name": "n".repeat(300), "color": "candy" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "name");
    assert_eq!(ctx.store.collection_count().await, 1);
}

#[tokio::test]
async fn test_unusable_token_subject_is_unauthorized() {
    let ctx = TestContext::new();

    for sub in [String::new(), "u".repeat(256)] {
        let (status, body) = ctx.send("GET", "/v1/me", Some(sub.as_str()), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "sub of {} chars", sub.len());
        assert_eq!(body["error"], "unauthorized");

        let (status, _) = ctx
            .send(
                "POST",
                "/v1/collections",
                Some(sub.as_str()),
                Some(json!({ "name": "Work", "color": "sunset" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    assert_eq!(ctx.store.collection_count().await, 0);
}

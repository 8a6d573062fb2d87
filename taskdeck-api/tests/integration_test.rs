/// Integration tests for the Taskdeck API
///
/// These tests drive the full router end-to-end: signup/login flows,
/// authenticated task CRUD, ownership enforcement, and the health check.
/// They require PostgreSQL (see tests/common/mod.rs) and skip with a notice
/// when `DATABASE_URL` is not set.

mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::json;

/// Acquires a test context or skips the test when no database is available
macro_rules! require_ctx {
    () => {
        match TestContext::try_new().await.expect("test setup failed") {
            Some(ctx) => ctx,
            None => {
                eprintln!("DATABASE_URL not set; skipping integration test");
                return;
            }
        }
    };
}

#[tokio::test]
async fn test_health_reports_connected_database() {
    let ctx = require_ctx!();

    let (status, body) = ctx.send("GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_signup_login_roundtrip() {
    let ctx = require_ctx!();

    let (user_id, email, token) = ctx.signup_user("longpassword1").await;
    assert!(!token.is_empty());

    // Wrong password is a uniform 401
    let (status, _) = ctx
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": "wrong" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Correct password returns the same user id
    let (status, body) = ctx
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": "longpassword1" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], user_id.as_str());
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_signup_duplicate_email_rejected() {
    let ctx = require_ctx!();

    let (_, email, _) = ctx.signup_user("longpassword1").await;

    let (status, body) = ctx
        .send(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({ "email": email, "password": "longpassword1" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_signup_short_password_rejected() {
    let ctx = require_ctx!();

    let (status, body) = ctx
        .send(
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({ "email": common::unique_email(), "password": "short" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_task_crud_lifecycle() {
    let ctx = require_ctx!();
    let (_, _, token) = ctx.signup_user("longpassword1").await;

    // Create
    let (status, task) = ctx
        .send(
            "POST",
            "/api/tasks",
            Some(&token),
            Some(json!({ "title": "Buy milk", "description": "2% if they have it" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["title"], "Buy milk");
    assert_eq!(task["completed"], false);
    let task_id = task["id"].as_i64().unwrap();

    // Read
    let (status, fetched) = ctx
        .send("GET", &format!("/api/tasks/{}", task_id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], task_id);

    // List includes it
    let (status, listing) = ctx.send("GET", "/api/tasks", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["total"], 1);

    // Partial update: title only, description untouched
    let (status, updated) = ctx
        .send(
            "PUT",
            &format!("/api/tasks/{}", task_id),
            Some(&token),
            Some(json!({ "title": "Buy oat milk" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Buy oat milk");
    assert_eq!(updated["description"], "2% if they have it");

    // Toggle twice returns to the original state
    let (status, toggled) = ctx
        .send(
            "PATCH",
            &format!("/api/tasks/{}/complete", task_id),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["completed"], true);

    let (_, toggled_back) = ctx
        .send(
            "PATCH",
            &format!("/api/tasks/{}/complete", task_id),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(toggled_back["completed"], false);

    // Delete
    let (status, _) = ctx
        .send(
            "DELETE",
            &format!("/api/tasks/{}", task_id),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Gone afterwards
    let (status, _) = ctx
        .send("GET", &format!("/api/tasks/{}", task_id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Deleting again reports not-found, not an error
    let (status, _) = ctx
        .send(
            "DELETE",
            &format!("/api/tasks/{}", task_id),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_completed_filter() {
    let ctx = require_ctx!();
    let (_, _, token) = ctx.signup_user("longpassword1").await;

    let (_, open_task) = ctx
        .send(
            "POST",
            "/api/tasks",
            Some(&token),
            Some(json!({ "title": "Open task" })),
        )
        .await;
    let (_, done_task) = ctx
        .send(
            "POST",
            "/api/tasks",
            Some(&token),
            Some(json!({ "title": "Done task" })),
        )
        .await;

    ctx.send(
        "PATCH",
        &format!("/api/tasks/{}/complete", done_task["id"].as_i64().unwrap()),
        Some(&token),
        None,
    )
    .await;

    let (status, listing) = ctx
        .send("GET", "/api/tasks?completed=true", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["tasks"][0]["title"], "Done task");

    let (_, listing) = ctx
        .send("GET", "/api/tasks?completed=false", Some(&token), None)
        .await;
    assert_eq!(listing["total"], 1);
    assert_eq!(
        listing["tasks"][0]["id"].as_i64(),
        open_task["id"].as_i64()
    );
}

#[tokio::test]
async fn test_ownership_enforced_across_users() {
    let ctx = require_ctx!();
    let (_, _, token_a) = ctx.signup_user("longpassword1").await;
    let (_, _, token_b) = ctx.signup_user("longpassword2").await;

    let (_, task) = ctx
        .send(
            "POST",
            "/api/tasks",
            Some(&token_a),
            Some(json!({ "title": "A's private task" })),
        )
        .await;
    let task_id = task["id"].as_i64().unwrap();

    // B gets 403 on every operation, and never the task content
    for (method, uri, body) in [
        ("GET", format!("/api/tasks/{}", task_id), None),
        (
            "PUT",
            format!("/api/tasks/{}", task_id),
            Some(json!({ "title": "hijacked" })),
        ),
        ("DELETE", format!("/api/tasks/{}", task_id), None),
        ("PATCH", format!("/api/tasks/{}/complete", task_id), None),
    ] {
        let (status, response) = ctx.send(method, &uri, Some(&token_b), body).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{} {} should be forbidden", method, uri);
        assert!(response.get("title").is_none());
    }

    // B's listing does not include A's task
    let (_, listing) = ctx.send("GET", "/api/tasks", Some(&token_b), None).await;
    assert_eq!(listing["total"], 0);

    // A still sees the task untouched
    let (status, fetched) = ctx
        .send("GET", &format!("/api/tasks/{}", task_id), Some(&token_a), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "A's private task");
}

#[tokio::test]
async fn test_requests_without_token_are_unauthorized() {
    let ctx = require_ctx!();

    let (status, _) = ctx.send("GET", "/api/tasks", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = ctx
        .send("GET", "/api/tasks", Some("not-a-real-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_task_empty_title_rejected() {
    let ctx = require_ctx!();
    let (_, _, token) = ctx.signup_user("longpassword1").await;

    let (status, body) = ctx
        .send(
            "POST",
            "/api/tasks",
            Some(&token),
            Some(json!({ "title": "   " })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
}

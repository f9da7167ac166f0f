//! HTTP-level tests for contact queries.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_and_login, get_auth, post_json, put_auth};
use serde_json::{json, Value};
use sqlx::PgPool;

fn query(subject: &str) -> Value {
    json!({
        "name": "Visitor",
        "email": "Visitor@Example.com",
        "subject": subject,
        "message": "When is the next alumni meet?",
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn anyone_can_send_a_query(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/queries", query("Alumni meet")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "visitor@example.com");
    assert_eq!(json["data"]["is_resolved"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_message_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let mut body = query("Alumni meet");
    body["message"] = json!("  ");

    let response = post_json(app, "/api/v1/queries", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_lists_and_resolves_queries(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (admin_user, admin) =
        create_and_login(app.clone(), &pool, "admin@example.com", "Admin", "admin").await;
    let (_jane, student) =
        create_and_login(app.clone(), &pool, "jane@example.com", "Jane Doe", "student").await;

    let created = body_json(post_json(app.clone(), "/api/v1/queries", query("Alumni meet")).await).await;
    post_json(app.clone(), "/api/v1/queries", query("Transcripts")).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response = get_auth(app.clone(), "/api/v1/queries", &student).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_auth(app.clone(), &format!("/api/v1/queries/{id}/resolve"), &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let resolved = body_json(response).await;
    assert_eq!(resolved["data"]["is_resolved"], true);
    assert_eq!(resolved["data"]["resolved_by"], admin_user.id);

    // Resolving again is harmless.
    let again = put_auth(app.clone(), &format!("/api/v1/queries/{id}/resolve"), &admin).await;
    assert_eq!(again.status(), StatusCode::OK);
    assert_eq!(
        body_json(again).await["data"]["resolved_at"],
        resolved["data"]["resolved_at"]
    );

    let open = body_json(get_auth(app.clone(), "/api/v1/queries?resolved=false", &admin).await).await;
    let open = open["data"].as_array().unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0]["subject"], "Transcripts");

    let missing = put_auth(app, "/api/v1/queries/999999/resolve", &admin).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

//! HTTP-level tests for achievement submissions.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, create_and_login, get, get_auth, post_json_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn future_achievement_date_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_jane, token) =
        create_and_login(app.clone(), &pool, "jane@example.com", "Jane Doe", "student").await;

    let tomorrow = (Utc::now() + Duration::days(2)).date_naive();
    let body = json!({
        "title": "Hackathon winner",
        "description": "First place at the state hackathon",
        "category": "competition",
        "achieved_on": tomorrow.to_string(),
    });
    let response = post_json_auth(app, "/api/v1/achievements", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("achieved_on"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn approved_achievement_is_published(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_jane, student) =
        create_and_login(app.clone(), &pool, "jane@example.com", "Jane Doe", "student").await;
    let (_admin, admin) =
        create_and_login(app.clone(), &pool, "admin@example.com", "Admin", "admin").await;

    let body = json!({
        "title": "  Best Paper Award ",
        "description": "Awarded at the annual symposium",
        "category": "research",
        "achieved_on": "2024-03-15",
    });
    let response = post_json_auth(app.clone(), "/api/v1/achievements", body, &student).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let record = &created["data"]["record"];
    assert_eq!(record["title"], "Best Paper Award");
    assert_eq!(record["achieved_on"], "2024-03-15");
    let id = record["id"].as_i64().unwrap();

    let published = body_json(get(app.clone(), "/api/v1/achievements/published").await).await;
    assert!(published["data"].as_array().unwrap().is_empty());

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/achievements/{id}/status"),
        json!({ "status": "approved" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let published = body_json(get(app.clone(), "/api/v1/achievements/published").await).await;
    assert_eq!(published["data"][0]["id"], id);

    // Approved records are visible to every member.
    let (_john, other) =
        create_and_login(app.clone(), &pool, "john@example.com", "John Smith", "student").await;
    let response = get_auth(app, &format!("/api/v1/achievements/{id}"), &other).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn denied_achievement_stays_out_of_published_list(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_jane, student) =
        create_and_login(app.clone(), &pool, "jane@example.com", "Jane Doe", "student").await;
    let (_admin, admin) =
        create_and_login(app.clone(), &pool, "admin@example.com", "Admin", "admin").await;

    let body = json!({
        "title": "Dean's list",
        "description": "Spring semester",
        "category": "academic",
    });
    let created =
        body_json(post_json_auth(app.clone(), "/api/v1/achievements", body, &student).await).await;
    let id = created["data"]["record"]["id"].as_i64().unwrap();

    put_json_auth(
        app.clone(),
        &format!("/api/v1/achievements/{id}/status"),
        json!({ "status": "denied" }),
        &admin,
    )
    .await;

    let published = body_json(get(app.clone(), "/api/v1/achievements/published").await).await;
    assert!(published["data"].as_array().unwrap().is_empty());

    let own = body_json(get_auth(app, "/api/v1/achievements?status=denied", &student).await).await;
    assert_eq!(own["data"][0]["id"], id);
    assert_eq!(own["data"][0]["status"], "denied");
}

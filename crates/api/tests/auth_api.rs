//! HTTP-level tests for authentication and admin user management.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_and_login, create_user, get_auth, post_json, post_json_auth, put_json_auth,
    TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_tokens_and_user(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    create_user(&pool, "jane@example.com", "Jane Doe", "student").await;

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": " JANE@example.com ", "password": TEST_PASSWORD }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].as_str().is_some());
    assert!(json["refresh_token"].as_str().is_some());
    assert_eq!(json["expires_in"], 15 * 60);
    assert_eq!(json["user"]["display_name"], "Jane Doe");
    assert_eq!(json["user"]["role"], "student");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_password_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    create_user(&pool, "jane@example.com", "Jane Doe", "student").await;

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "jane@example.com", "password": "not-the-password" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeated_failures_lock_the_account(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    create_user(&pool, "jane@example.com", "Jane Doe", "student").await;

    for _ in 0..5 {
        let response = post_json(
            app.clone(),
            "/api/v1/auth/login",
            json!({ "email": "jane@example.com", "password": "not-the-password" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Even the right password is refused while locked.
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "jane@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivation_blocks_login_and_refresh(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_admin, admin) =
        create_and_login(app.clone(), &pool, "admin@example.com", "Admin", "admin").await;
    let jane = create_user(&pool, "jane@example.com", "Jane Doe", "student").await;
    let session = body_json(
        post_json(
            app.clone(),
            "/api/v1/auth/login",
            json!({ "email": "jane@example.com", "password": TEST_PASSWORD }),
        )
        .await,
    )
    .await;

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/admin/users/{}", jane.id),
        json!({ "is_active": false }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_active"], false);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "email": "jane@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Deactivation also ends the sessions she already had.
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": session["refresh_token"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_the_token(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    create_user(&pool, "jane@example.com", "Jane Doe", "student").await;

    let login = body_json(
        post_json(
            app.clone(),
            "/api/v1/auth/login",
            json!({ "email": "jane@example.com", "password": TEST_PASSWORD }),
        )
        .await,
    )
    .await;
    let refresh_token = login["refresh_token"].as_str().unwrap().to_string();

    let response = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["refresh_token"], login["refresh_token"]);

    // The old token was revoked by the rotation.
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_refresh_tokens(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    create_user(&pool, "jane@example.com", "Jane Doe", "student").await;

    let login = body_json(
        post_json(
            app.clone(),
            "/api/v1/auth/login",
            json!({ "email": "jane@example.com", "password": TEST_PASSWORD }),
        )
        .await,
    )
    .await;
    let access = login["access_token"].as_str().unwrap();

    let me = get_auth(app.clone(), "/api/v1/auth/me", access).await;
    assert_eq!(me.status(), StatusCode::OK);
    assert_eq!(body_json(me).await["data"]["email"], "jane@example.com");

    let response = post_json_auth(app.clone(), "/api/v1/auth/logout", json!({}), access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": login["refresh_token"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_requires_a_valid_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/auth/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_creates_users(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_admin, admin) =
        create_and_login(app.clone(), &pool, "admin@example.com", "Admin", "admin").await;
    let (_jane, student) =
        create_and_login(app.clone(), &pool, "jane@example.com", "Jane Doe", "student").await;

    let new_user = json!({
        "email": "John@Example.com",
        "display_name": " John  Smith ",
        "password": "a-long-enough-password",
        "role": "student",
    });

    let response =
        post_json_auth(app.clone(), "/api/v1/admin/users", new_user.clone(), &student).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(app.clone(), "/api/v1/admin/users", new_user.clone(), &admin).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["email"], "john@example.com");
    assert_eq!(created["data"]["display_name"], "John Smith");
    assert!(created["data"].get("password_hash").is_none());

    let response = post_json_auth(app.clone(), "/api/v1/admin/users", new_user, &admin).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_json_auth(
        app,
        "/api/v1/admin/users",
        json!({
            "email": "short@example.com",
            "display_name": "Short",
            "password": "short",
            "role": "student",
        }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn moderation_summary_counts_by_status(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_admin, admin) =
        create_and_login(app.clone(), &pool, "admin@example.com", "Admin", "admin").await;
    let (_jane, student) =
        create_and_login(app.clone(), &pool, "jane@example.com", "Jane Doe", "student").await;

    for title in ["One", "Two"] {
        post_json_auth(
            app.clone(),
            "/api/v1/blogs",
            json!({ "title": title, "body": "Text" }),
            &student,
        )
        .await;
    }

    let response = get_auth(app.clone(), "/api/v1/admin/moderation/summary", &student).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(get_auth(app, "/api/v1/admin/moderation/summary", &admin).await).await;
    assert_eq!(json["data"]["blogs"], json!([{ "status": "pending", "count": 2 }]));
    assert_eq!(json["data"]["achievements"], json!([]));
    assert_eq!(json["data"]["registration_requests"], json!([]));
}

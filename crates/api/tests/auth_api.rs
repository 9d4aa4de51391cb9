//! HTTP-level tests for admin login, session cookies, refresh rotation,
//! logout and rate limiting.

mod common;

use axum::http::header::{RETRY_AFTER, SET_COOKIE};
use axum::http::StatusCode;
use common::{body_json, build_test_app, create_user, session_cookie, TEST_PASSWORD};
use serde_json::json;

#[tokio::test]
async fn login_sets_session_cookie_and_returns_user() {
    let app = build_test_app().await;
    create_user(&app.pool, "admin@sonaverse.kr", "admin").await;

    let response = app
        .post_json(
            "/api/admin/auth/login",
            json!({ "email": "Admin@Sonaverse.kr", "password": TEST_PASSWORD }),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap().to_string();
    assert!(set_cookie.starts_with("admin-session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));
    assert!(!set_cookie.contains("Secure"), "development cookies are not Secure");

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["user"]["email"], "admin@sonaverse.kr");
    assert_eq!(json["data"]["user"]["role"], "admin");
    assert!(json["data"]["refreshToken"].is_string());
    assert!(json["data"]["expiresAt"].is_string());
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = build_test_app().await;
    create_user(&app.pool, "admin@sonaverse.kr", "admin").await;

    let response = app
        .post_json(
            "/api/admin/auth/login",
            json!({ "email": "admin@sonaverse.kr", "password": "not-the-password" }),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&response).is_none());

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn me_requires_a_session() {
    let app = build_test_app().await;

    let response = app.get("/api/admin/auth/me", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.get("/api/admin/auth/me", Some("admin-session=garbage")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let cookie = app.admin_session().await;
    let response = app.get("/api/admin/auth/me", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "admin@sonaverse.kr");
    assert_eq!(json["data"]["name"], "테스트 관리자");
}

#[tokio::test]
async fn logout_revokes_session_and_is_idempotent() {
    let app = build_test_app().await;
    let cookie = app.admin_session().await;

    let response = app.post_json("/api/admin/auth/logout", json!({}), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cleared = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap().to_string();
    assert!(cleared.starts_with("admin-session=;"));
    assert!(cleared.contains("Max-Age=0"));

    // The token is still correctly signed but its session is revoked.
    let response = app.get("/api/admin/auth/me", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let again = app.post_json("/api/admin/auth/logout", json!({}), Some(&cookie)).await;
    assert_eq!(again.status(), StatusCode::OK);

    let anonymous = app.post_json("/api/admin/auth/logout", json!({}), None).await;
    assert_eq!(anonymous.status(), StatusCode::OK);
}

#[tokio::test]
async fn refresh_rotates_the_session_once() {
    let app = build_test_app().await;
    create_user(&app.pool, "admin@sonaverse.kr", "admin").await;

    let login = app
        .post_json(
            "/api/admin/auth/login",
            json!({ "email": "admin@sonaverse.kr", "password": TEST_PASSWORD }),
            None,
        )
        .await;
    let old_cookie = session_cookie(&login).unwrap();
    let refresh_token = body_json(login).await["data"]["refreshToken"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .post_json("/api/admin/auth/refresh", json!({ "refreshToken": refresh_token }), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let new_cookie = session_cookie(&response).unwrap();
    assert_ne!(new_cookie, old_cookie);

    assert_eq!(
        app.get("/api/admin/auth/me", Some(&old_cookie)).await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        app.get("/api/admin/auth/me", Some(&new_cookie)).await.status(),
        StatusCode::OK
    );

    let reused = app
        .post_json("/api/admin/auth/refresh", json!({ "refreshToken": refresh_token }), None)
        .await;
    assert_eq!(reused.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn sixth_login_attempt_is_rate_limited() {
    let app = build_test_app().await;
    create_user(&app.pool, "admin@sonaverse.kr", "admin").await;

    for _ in 0..5 {
        let response = app
            .post_json(
                "/api/admin/auth/login",
                json!({ "email": "nobody@sonaverse.kr", "password": "whatever1" }),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Correct credentials do not bypass an exhausted window.
    let response = app
        .post_json(
            "/api/admin/auth/login",
            json!({ "email": "admin@sonaverse.kr", "password": TEST_PASSWORD }),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let retry_after: u64 = response
        .headers()
        .get(RETRY_AFTER)
        .unwrap()
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(retry_after > 0 && retry_after <= 900);

    let json = body_json(response).await;
    assert_eq!(json["code"], "RATE_LIMITED");
}

#[tokio::test]
async fn sessions_list_marks_current_and_revokes_others() {
    let app = build_test_app().await;
    create_user(&app.pool, "admin@sonaverse.kr", "admin").await;
    let first = app.login("admin@sonaverse.kr", TEST_PASSWORD).await;
    let second = app.login("admin@sonaverse.kr", TEST_PASSWORD).await;

    let json = body_json(app.get("/api/admin/sessions", Some(&second)).await).await;
    let sessions = json["data"].as_array().unwrap();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions.iter().filter(|s| s["current"] == true).count(), 1);
    assert!(sessions.iter().all(|s| s.get("accessTokenHash").is_none()));

    let other_id = sessions.iter().find(|s| s["current"] == false).unwrap()["id"]
        .as_i64()
        .unwrap();
    let response = app
        .delete(&format!("/api/admin/sessions/{other_id}"), Some(&second))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        app.get("/api/admin/auth/me", Some(&first)).await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        app.delete(&format!("/api/admin/sessions/{other_id}"), Some(&second))
            .await
            .status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn editors_cannot_use_admin_only_endpoints() {
    let app = build_test_app().await;
    create_user(&app.pool, "editor@sonaverse.kr", "editor").await;
    let cookie = app.login("editor@sonaverse.kr", TEST_PASSWORD).await;

    let response = app
        .put_json("/api/admin/settings", json!({ "phone": "02-000-0000" }), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");

    // Editors still manage content.
    let response = app
        .post_json("/api/admin/tags", json!({ "nameKo": "보행기", "nameEn": "Walker" }), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

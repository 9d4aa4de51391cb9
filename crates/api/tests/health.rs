mod common;

use axum::body::Body;
use axum::http::header::{HeaderName, ORIGIN};
use axum::http::{Request, StatusCode};
use common::{body_json, build_test_app};

#[tokio::test]
async fn health_reports_database() {
    let app = build_test_app().await;
    let response = app.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(HeaderName::from_static("x-request-id")));

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = build_test_app().await;
    let response = app.get("/api/does-not-exist", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_allows_configured_origin_with_credentials() {
    let app = build_test_app().await;
    let response = app
        .send(
            Request::builder()
                .uri("/api/tags")
                .header(ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        response.headers().get("access-control-allow-credentials").unwrap(),
        "true"
    );
}

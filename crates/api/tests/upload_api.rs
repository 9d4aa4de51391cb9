//! Multipart upload and image library tests.

mod common;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_test_app, TestApp};
use sonaverse_core::upload::MAX_UPLOAD_BYTES;

const BOUNDARY: &str = "sonaverse-test-boundary";

/// Minimal PNG signature plus filler; content is never decoded.
const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot-really-an-image";

fn multipart_body(file_name: &str, mime: &str, bytes: &[u8], folder: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(folder) = folder {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"folder\"\r\n\r\n{folder}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {mime}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload(
    app: &TestApp,
    cookie: Option<&str>,
    body: Vec<u8>,
) -> axum::http::Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/api/upload")
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"));
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    app.send(builder.body(Body::from(body)).unwrap()).await
}

#[tokio::test]
async fn png_upload_is_stored_and_recorded() {
    let app = build_test_app().await;
    let cookie = app.admin_session().await;

    let response = upload(
        &app,
        Some(&cookie),
        multipart_body("walker.png", "image/png", PNG_BYTES, Some("Products/../x")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    let url = data["url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/productsx/"), "unexpected url {url}");
    assert!(url.ends_with(".png"));
    assert_eq!(data["originalName"], "walker.png");
    assert_eq!(data["size"], PNG_BYTES.len());
    assert_eq!(data["type"], "image/png");

    let filename = data["filename"].as_str().unwrap();
    let stored = app.upload_dir.path().join("productsx").join(filename);
    assert_eq!(std::fs::read(stored).unwrap(), PNG_BYTES);

    // The stored file is served back under /uploads.
    let served = app.get(url, None).await;
    assert_eq!(served.status(), StatusCode::OK);

    let id = data["id"].as_i64().unwrap();
    let image = body_json(app.get(&format!("/api/admin/images/{id}"), Some(&cookie)).await).await;
    assert_eq!(image["data"]["folder"], "productsx");
    assert_eq!(image["data"]["deletion"]["status"], "active");
}

#[tokio::test]
async fn missing_folder_uses_default() {
    let app = build_test_app().await;
    let cookie = app.admin_session().await;

    let response = upload(&app, Some(&cookie), multipart_body("a.webp", "image/webp", b"RIFFxxxxWEBP", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["url"].as_str().unwrap().starts_with("/uploads/general/"));
}

#[tokio::test]
async fn disallowed_type_is_rejected() {
    let app = build_test_app().await;
    let cookie = app.admin_session().await;

    let response = upload(
        &app,
        Some(&cookie),
        multipart_body("notes.pdf", "application/pdf", b"%PDF-1.4", Some("press")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    assert!(!app.upload_dir.path().join("press").exists());
}

#[tokio::test]
async fn request_without_file_is_bad_request() {
    let app = build_test_app().await;
    let cookie = app.admin_session().await;

    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"folder\"\r\n\r\npress\r\n--{BOUNDARY}--\r\n"
    );
    let response = upload(&app, Some(&cookie), body.into_bytes()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_requires_login() {
    let app = build_test_app().await;
    let response = upload(&app, None, multipart_body("a.png", "image/png", PNG_BYTES, None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn image_soft_delete_hides_from_list() {
    let app = build_test_app().await;
    let cookie = app.admin_session().await;

    let json = body_json(upload(&app, Some(&cookie), multipart_body("a.png", "image/png", PNG_BYTES, None)).await).await;
    let id = json["data"]["id"].as_i64().unwrap();

    let response = app.delete(&format!("/api/admin/images/{id}"), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let list = body_json(app.get("/api/admin/images", Some(&cookie)).await).await;
    assert!(list["data"].as_array().unwrap().is_empty());

    let image = body_json(app.get(&format!("/api/admin/images/{id}"), Some(&cookie)).await).await;
    assert_eq!(image["data"]["deletion"]["status"], "deleted");

    let again = app.delete(&format!("/api/admin/images/{id}"), Some(&cookie)).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn extension_follows_checked_mime_type() {
    let app = build_test_app().await;
    let cookie = app.admin_session().await;

    for name in ["evil.html", "evil.svg", "evil.png.js"] {
        let json = body_json(
            upload(&app, Some(&cookie), multipart_body(name, "image/png", PNG_BYTES, Some("press"))).await,
        )
        .await;
        let filename = json["data"]["filename"].as_str().unwrap();
        assert!(filename.ends_with(".png"), "{name} stored as {filename}");
        assert_eq!(json["data"]["originalName"], name);
    }
}

#[tokio::test]
async fn file_just_over_ceiling_is_a_validation_error() {
    let app = build_test_app().await;
    let cookie = app.admin_session().await;

    let oversized = vec![0u8; MAX_UPLOAD_BYTES + 1];
    let response = upload(&app, Some(&cookie), multipart_body("big.png", "image/png", &oversized, None)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("10MB"));
    assert!(!app.upload_dir.path().join("general").exists());
}

#[tokio::test]
async fn body_over_transport_limit_is_a_validation_error() {
    let app = build_test_app().await;
    let cookie = app.admin_session().await;

    let huge = vec![0u8; MAX_UPLOAD_BYTES + 256 * 1024];
    let response = upload(&app, Some(&cookie), multipart_body("huge.png", "image/png", &huge, None)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].as_str().unwrap().contains("10MB"));
}

#[tokio::test]
async fn failed_record_removes_written_file() {
    let app = build_test_app().await;
    let cookie = app.admin_session().await;

    sqlx::query("DROP TABLE images").execute(&app.pool).await.unwrap();

    let response = upload(&app, Some(&cookie), multipart_body("a.png", "image/png", PNG_BYTES, Some("press"))).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let leftover = std::fs::read_dir(app.upload_dir.path().join("press")).unwrap().count();
    assert_eq!(leftover, 0);
}

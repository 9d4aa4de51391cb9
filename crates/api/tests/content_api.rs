//! Public and admin content flows: history, press, tags, inquiries, SEO.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_user, TEST_PASSWORD};
use serde_json::json;

#[tokio::test]
async fn public_history_is_ordered_and_localized() {
    let app = build_test_app().await;
    let cookie = app.admin_session().await;

    for (year, title_ko, title_en) in [(2023, "투자 유치", Some("Series A")), (2021, "법인 설립", None)] {
        let response = app
            .post_json(
                "/api/admin/history",
                json!({
                    "year": year,
                    "titleKo": title_ko,
                    "titleEn": title_en,
                    "items": [{ "textKo": "첫 항목" }],
                }),
                Some(&cookie),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let json = body_json(app.get("/api/history?locale=en", None).await).await;
    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["year"], 2021);
    // No English title stored, so Korean is used.
    assert_eq!(entries[0]["title"], "법인 설립");
    assert_eq!(entries[1]["title"], "Series A");
    assert_eq!(entries[1]["items"][0]["text"], "첫 항목");
}

#[tokio::test]
async fn history_rejects_out_of_range_year() {
    let app = build_test_app().await;
    let cookie = app.admin_session().await;

    let response = app
        .post_json("/api/admin/history", json!({ "year": 1800, "titleKo": "옛날" }), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["error"],
        "연도는 1900년부터 2100년 사이여야 합니다. (입력값: 1800)"
    );
}

#[tokio::test]
async fn validation_errors_are_korean() {
    let app = build_test_app().await;
    let cookie = app.admin_session().await;

    let response = app
        .post_json(
            "/api/admin/history",
            json!({ "year": 2024, "titleKo": "출시", "position": "center" }),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("잘못된 위치 값입니다"), "{error}");

    let response = app
        .post_json("/api/admin/press", json!({ "titleKo": "제목", "slug": "Bad Slug", "bodyKo": "본문" }), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("잘못된 슬러그입니다"), "{error}");

    let response = app.get("/api/seo/pages/admin", None).await;
    let error = body_json(response).await["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("알 수 없는 페이지입니다"), "{error}");
}

#[tokio::test]
async fn huge_page_number_returns_empty_page() {
    let app = build_test_app().await;

    let response = app.get("/api/press?page=9223372036854775807&limit=100", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
    assert_eq!(json["pagination"]["page"], i64::MAX);
}

#[tokio::test]
async fn only_published_press_is_public() {
    let app = build_test_app().await;
    let cookie = app.admin_session().await;

    let published = app
        .post_json(
            "/api/admin/press",
            json!({
                "titleKo": "신제품 출시",
                "titleEn": "New Walker Launch",
                "bodyKo": "본문",
                "isPublished": true,
            }),
            Some(&cookie),
        )
        .await;
    assert_eq!(published.status(), StatusCode::OK);
    let published = body_json(published).await;
    assert_eq!(published["data"]["slug"], "new-walker-launch");

    let draft = app
        .post_json(
            "/api/admin/press",
            json!({ "titleKo": "초안", "slug": "draft-release", "bodyKo": "본문" }),
            Some(&cookie),
        )
        .await;
    assert_eq!(draft.status(), StatusCode::OK);

    let list = body_json(app.get("/api/press?locale=en&limit=10", None).await).await;
    let items = list["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "New Walker Launch");
    assert!(items[0]["body"].is_null());
    assert_eq!(list["pagination"]["total"], 1);
    assert_eq!(list["pagination"]["limit"], 10);

    let detail = body_json(app.get("/api/press/new-walker-launch?locale=ko", None).await).await;
    assert_eq!(detail["data"]["body"], "본문");

    assert_eq!(
        app.get("/api/press/draft-release", None).await.status(),
        StatusCode::NOT_FOUND
    );

    let admin = body_json(app.get("/api/admin/press", Some(&cookie)).await).await;
    assert_eq!(admin["pagination"]["total"], 2);
}

#[tokio::test]
async fn duplicate_slug_conflicts() {
    let app = build_test_app().await;
    let cookie = app.admin_session().await;

    let body = json!({ "titleKo": "제목", "slug": "same-slug", "bodyKo": "본문" });
    assert_eq!(
        app.post_json("/api/admin/press", body.clone(), Some(&cookie)).await.status(),
        StatusCode::OK
    );
    let second = app.post_json("/api/admin/press", body, Some(&cookie)).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn tag_usage_follows_attached_content() {
    let app = build_test_app().await;
    let cookie = app.admin_session().await;

    let tag = body_json(
        app.post_json("/api/admin/tags", json!({ "nameKo": "보행기", "nameEn": "Walker" }), Some(&cookie))
            .await,
    )
    .await;
    let tag_id = tag["data"]["id"].as_i64().unwrap();
    assert_eq!(tag["data"]["slug"], "walker");
    assert_eq!(tag["data"]["usageCount"], 0);

    let press = body_json(
        app.post_json(
            "/api/admin/press",
            json!({ "titleKo": "태그 기사", "slug": "tagged", "bodyKo": "본문", "isPublished": true, "tagIds": [tag_id] }),
            Some(&cookie),
        )
        .await,
    )
    .await;
    let press_id = press["data"]["id"].as_i64().unwrap();

    let tag = body_json(app.get(&format!("/api/admin/tags/{tag_id}"), Some(&cookie)).await).await;
    assert_eq!(tag["data"]["usageCount"], 1);

    let filtered = body_json(app.get("/api/press?tag=walker", None).await).await;
    assert_eq!(filtered["data"].as_array().unwrap().len(), 1);

    assert_eq!(
        app.delete(&format!("/api/admin/press/{press_id}"), Some(&cookie)).await.status(),
        StatusCode::OK
    );
    let tag = body_json(app.get(&format!("/api/admin/tags/{tag_id}"), Some(&cookie)).await).await;
    assert_eq!(tag["data"]["usageCount"], 0);
}

#[tokio::test]
async fn inquiry_submission_and_triage() {
    let app = build_test_app().await;

    let invalid = app
        .post_json(
            "/api/inquiries",
            json!({ "name": "홍길동", "email": "not-an-email", "inquiryType": "product", "message": "짧음" }),
            None,
        )
        .await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(invalid).await["code"], "VALIDATION_ERROR");

    let valid = app
        .post_json(
            "/api/inquiries",
            json!({
                "name": "홍길동",
                "email": "Hong@Example.com",
                "inquiryType": "product",
                "message": "보행기 구매 문의드립니다. 연락 부탁드립니다.",
                "locale": "ko",
            }),
            None,
        )
        .await;
    assert_eq!(valid.status(), StatusCode::OK);
    let inquiry = body_json(valid).await;
    assert_eq!(inquiry["data"]["email"], "hong@example.com");
    assert_eq!(inquiry["data"]["status"], "new");
    let inquiry_id = inquiry["data"]["id"].as_i64().unwrap();

    create_user(&app.pool, "editor@sonaverse.kr", "editor").await;
    let editor = app.login("editor@sonaverse.kr", TEST_PASSWORD).await;
    assert_eq!(
        app.get("/api/admin/inquiries", Some(&editor)).await.status(),
        StatusCode::FORBIDDEN
    );

    let admin = app.admin_session().await;
    let list = body_json(app.get("/api/admin/inquiries?status=new", Some(&admin)).await).await;
    assert_eq!(list["pagination"]["total"], 1);

    let updated = app
        .put_json(
            &format!("/api/admin/inquiries/{inquiry_id}/status"),
            json!({ "status": "in_progress" }),
            Some(&admin),
        )
        .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["data"]["status"], "in_progress");

    let bogus = app
        .put_json(
            &format!("/api/admin/inquiries/{inquiry_id}/status"),
            json!({ "status": "archived" }),
            Some(&admin),
        )
        .await;
    assert_eq!(bogus.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn seo_for_pages_and_press() {
    let app = build_test_app().await;
    let cookie = app.admin_session().await;

    let page = body_json(app.get("/api/seo/pages/press?locale=en", None).await).await;
    assert_eq!(page["data"]["title"], "Press | SONAVERSE");
    assert_eq!(page["data"]["canonical"], "https://sonaverse.kr/en/press");

    assert_eq!(
        app.get("/api/seo/pages/admin", None).await.status(),
        StatusCode::BAD_REQUEST
    );

    app.post_json(
        "/api/admin/press",
        json!({
            "titleKo": "신제품 출시",
            "slug": "launch",
            "summaryKo": "요약",
            "bodyKo": "본문",
            "thumbnailUrl": "/uploads/press/a.png",
            "isPublished": true,
        }),
        Some(&cookie),
    )
    .await;

    let meta = body_json(app.get("/api/seo/press/launch", None).await).await;
    assert_eq!(meta["data"]["title"], "신제품 출시 | SONAVERSE");
    assert_eq!(meta["data"]["description"], "요약");
    assert_eq!(meta["data"]["openGraph"]["type"], "article");
    assert_eq!(meta["data"]["twitter"]["card"], "summary_large_image");

    assert_eq!(
        app.get("/api/seo/press/missing", None).await.status(),
        StatusCode::NOT_FOUND
    );
}

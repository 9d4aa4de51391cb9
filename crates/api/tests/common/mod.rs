#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sonaverse_api::auth::jwt::JwtConfig;
use sonaverse_api::auth::password::hash_password;
use sonaverse_api::config::{AppEnv, RateLimitBackend, ServerConfig};
use sonaverse_api::rate_limit::RateLimiter;
use sonaverse_api::router::build_app_router;
use sonaverse_api::state::AppState;
use sonaverse_db::models::admin_user::{AdminUser, CreateAdminUser};
use sonaverse_db::repositories::AdminUserRepo;
use sonaverse_db::DbPool;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "sonaverse-test-pw";

/// A fully wired application over a private in-memory database.
pub struct TestApp {
    pub router: Router,
    pub pool: DbPool,
    /// Keeps the upload root alive for the duration of the test.
    pub upload_dir: TempDir,
}

pub fn test_config(upload_dir: &TempDir) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        site_url: "https://sonaverse.kr".to_string(),
        environment: AppEnv::Development,
        upload_dir: upload_dir.path().to_path_buf(),
        rate_limit_backend: RateLimitBackend::Memory,
        session_purge_interval_secs: 3600,
        bootstrap_admin: None,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
        },
    }
}

pub async fn build_test_app() -> TestApp {
    let pool = sonaverse_db::create_memory_pool()
        .await
        .expect("in-memory database should open");
    let upload_dir = TempDir::new().expect("temp dir should be created");
    let config = test_config(&upload_dir);

    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        rate_limiter: Arc::new(RateLimiter::memory()),
    };

    TestApp {
        router: build_app_router(state, &config),
        pool,
        upload_dir,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router should respond")
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        self.send(request(Method::GET, uri, cookie).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        self.send(request(Method::DELETE, uri, cookie).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value, cookie: Option<&str>) -> Response<Body> {
        self.json(Method::POST, uri, body, cookie).await
    }

    pub async fn put_json(&self, uri: &str, body: serde_json::Value, cookie: Option<&str>) -> Response<Body> {
        self.json(Method::PUT, uri, body, cookie).await
    }

    async fn json(&self, method: Method, uri: &str, body: serde_json::Value, cookie: Option<&str>) -> Response<Body> {
        self.send(
            request(method, uri, cookie)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Log in through the API and return the `admin-session=<token>` pair.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post_json(
                "/api/admin/auth/login",
                serde_json::json!({ "email": email, "password": password }),
                None,
            )
            .await;
        assert_eq!(response.status(), 200, "login should succeed");
        session_cookie(&response).expect("login should set the session cookie")
    }

    /// Create an admin account and log it in.
    pub async fn admin_session(&self) -> String {
        create_user(&self.pool, "admin@sonaverse.kr", "admin").await;
        self.login("admin@sonaverse.kr", TEST_PASSWORD).await
    }
}

fn request(method: Method, uri: &str, cookie: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match cookie {
        Some(cookie) => builder.header(COOKIE, cookie),
        None => builder,
    }
}

pub async fn create_user(pool: &DbPool, email: &str, role: &str) -> AdminUser {
    AdminUserRepo::create(
        pool,
        &CreateAdminUser {
            email: email.to_string(),
            name: "테스트 관리자".to_string(),
            password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
            role: role.to_string(),
        },
    )
    .await
    .expect("user creation should succeed")
}

/// `name=value` of the `admin-session` cookie set by a response.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("admin-session="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

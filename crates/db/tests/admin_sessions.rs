//! Admin users and device sessions.

use chrono::{Duration, Utc};
use sonaverse_db::models::admin_session::{CreateAdminSession, RevocationReason};
use sonaverse_db::models::admin_user::CreateAdminUser;
use sonaverse_db::repositories::{AdminSessionRepo, AdminUserRepo};
use sonaverse_db::DbPool;

async fn admin(pool: &DbPool) -> i64 {
    AdminUserRepo::create(
        pool,
        &CreateAdminUser {
            email: "Admin@Sonaverse.kr".to_string(),
            name: "관리자".to_string(),
            password_hash: "hash".to_string(),
            role: "admin".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

fn session(user_id: i64, access: &str, refresh: &str, expires_in: Duration) -> CreateAdminSession {
    let now = Utc::now();
    CreateAdminSession {
        user_id,
        access_token_hash: access.to_string(),
        refresh_token_hash: refresh.to_string(),
        ip_address: Some("10.0.0.1".to_string()),
        user_agent: None,
        device_type: "desktop".to_string(),
        browser: "Chrome".to_string(),
        os: "macOS".to_string(),
        country: None,
        city: None,
        expires_at: now + expires_in,
        refresh_expires_at: now + expires_in + Duration::days(23),
    }
}

#[tokio::test]
async fn email_lookup_is_case_insensitive() {
    let pool = sonaverse_db::create_memory_pool().await.unwrap();
    let id = admin(&pool).await;
    let found = AdminUserRepo::find_by_email(&pool, " admin@SONAVERSE.kr").await.unwrap().unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.email, "admin@sonaverse.kr");
    assert_eq!(AdminUserRepo::count_admins(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn revoked_session_is_invalid_and_not_listed() {
    let pool = sonaverse_db::create_memory_pool().await.unwrap();
    let user = admin(&pool).await;
    let s = AdminSessionRepo::create(&pool, &session(user, "a1", "r1", Duration::days(7)))
        .await
        .unwrap();
    let now = Utc::now();
    assert!(s.is_valid_at(now));

    let active = AdminSessionRepo::list_active_for_user(&pool, user, now).await.unwrap();
    assert_eq!(active.len(), 1);

    assert!(AdminSessionRepo::revoke(&pool, s.id, RevocationReason::Logout).await.unwrap());
    assert!(!AdminSessionRepo::revoke(&pool, s.id, RevocationReason::Logout).await.unwrap());

    let reloaded = AdminSessionRepo::find_by_access_hash(&pool, "a1").await.unwrap().unwrap();
    assert!(!reloaded.is_valid_at(now));
    assert_eq!(reloaded.revoked_reason.as_deref(), Some("logout"));
    assert!(AdminSessionRepo::list_active_for_user(&pool, user, now).await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_token_hash_is_a_unique_violation() {
    let pool = sonaverse_db::create_memory_pool().await.unwrap();
    let user = admin(&pool).await;
    AdminSessionRepo::create(&pool, &session(user, "dup", "r1", Duration::days(7)))
        .await
        .unwrap();
    let err = AdminSessionRepo::create(&pool, &session(user, "dup", "r2", Duration::days(7)))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert!(db_err.is_unique_violation());
}

#[tokio::test]
async fn purge_removes_only_dead_sessions() {
    let pool = sonaverse_db::create_memory_pool().await.unwrap();
    let user = admin(&pool).await;
    let live = AdminSessionRepo::create(&pool, &session(user, "live", "r-live", Duration::days(7)))
        .await
        .unwrap();
    AdminSessionRepo::create(&pool, &session(user, "old", "r-old", Duration::days(-40)))
        .await
        .unwrap();
    let revoked = AdminSessionRepo::create(&pool, &session(user, "rev", "r-rev", Duration::days(-1)))
        .await
        .unwrap();
    AdminSessionRepo::revoke(&pool, revoked.id, RevocationReason::Rotated).await.unwrap();

    let removed = AdminSessionRepo::purge_expired(&pool, Utc::now()).await.unwrap();
    assert_eq!(removed, 2);
    assert!(AdminSessionRepo::find_by_id(&pool, live.id).await.unwrap().is_some());
}

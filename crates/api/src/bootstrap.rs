//! First-run admin account seeding.

use sonaverse_core::roles::ROLE_ADMIN;
use sonaverse_db::models::admin_user::CreateAdminUser;
use sonaverse_db::repositories::AdminUserRepo;
use sonaverse_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LEN};
use crate::config::BootstrapAdmin;
use crate::error::{AppError, AppResult};

/// Display name given to the seeded account.
pub const BOOTSTRAP_ADMIN_NAME: &str = "관리자";

/// Create the configured admin account when no admin exists yet.
///
/// Returns `true` when an account was created. Existing admins are never
/// touched, so the bootstrap credentials can stay configured after first run.
pub async fn ensure_admin(pool: &DbPool, bootstrap: &BootstrapAdmin) -> AppResult<bool> {
    if AdminUserRepo::count_admins(pool).await? > 0 {
        tracing::debug!("Admin account already present, skipping bootstrap");
        return Ok(false);
    }

    validate_password_strength(&bootstrap.password, MIN_PASSWORD_LEN)
        .map_err(AppError::BadRequest)?;

    let password_hash = hash_password(&bootstrap.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = AdminUserRepo::create(
        pool,
        &CreateAdminUser {
            email: bootstrap.email.clone(),
            name: BOOTSTRAP_ADMIN_NAME.to_string(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, email = %user.email, "Bootstrap admin account created");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn bootstrap(password: &str) -> BootstrapAdmin {
        BootstrapAdmin {
            email: "Admin@Sonaverse.kr".into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn seeds_once() {
        let pool = sonaverse_db::create_memory_pool().await.unwrap();

        assert!(ensure_admin(&pool, &bootstrap("sonaverse-admin")).await.unwrap());
        assert!(!ensure_admin(&pool, &bootstrap("another-password")).await.unwrap());

        let user = AdminUserRepo::find_by_email(&pool, "admin@sonaverse.kr")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.role, ROLE_ADMIN);
        assert_eq!(user.name, BOOTSTRAP_ADMIN_NAME);
    }

    #[tokio::test]
    async fn weak_password_rejected() {
        let pool = sonaverse_db::create_memory_pool().await.unwrap();
        assert_matches!(
            ensure_admin(&pool, &bootstrap("short")).await,
            Err(AppError::BadRequest(_))
        );
        assert_eq!(AdminUserRepo::count_admins(&pool).await.unwrap(), 0);
    }
}

use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Deployment environment. Production turns on `Secure` session cookies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

/// Where rate-limit counters live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitBackend {
    /// Shared `rate_limit_buckets` table; consistent across instances.
    Database,
    /// Process-local map; each instance counts on its own.
    Memory,
}

/// Credentials for seeding the first admin account.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Public base URL used for canonical and Open Graph links.
    pub site_url: String,
    pub environment: AppEnv,
    /// Root directory for uploaded files, served at `/uploads`.
    pub upload_dir: PathBuf,
    pub rate_limit_backend: RateLimitBackend,
    pub session_purge_interval_secs: u64,
    pub bootstrap_admin: Option<BootstrapAdmin>,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default                                 |
    /// |---------------------------------|-----------------------------------------|
    /// | `HOST`                          | `0.0.0.0`                               |
    /// | `PORT`                          | `3000`                                  |
    /// | `DATABASE_URL`                  | `sqlite://data/sonaverse.db?mode=rwc`   |
    /// | `CORS_ORIGINS`                  | `http://localhost:3000`                 |
    /// | `REQUEST_TIMEOUT_SECS`          | `30`                                    |
    /// | `SITE_URL` / `NEXT_PUBLIC_SITE_URL` | `http://localhost:3000`             |
    /// | `APP_ENV` / `NODE_ENV`          | `development`                           |
    /// | `UPLOAD_DIR`                    | `public/uploads`                        |
    /// | `RATE_LIMIT_BACKEND`            | `database`                              |
    /// | `SESSION_PURGE_INTERVAL_SECS`   | `3600`                                  |
    /// | `ADMIN_BOOTSTRAP_EMAIL` / `ADMIN_BOOTSTRAP_PASSWORD` | unset              |
    ///
    /// # Panics
    ///
    /// Panics on malformed or zero numeric values, an unknown rate-limit
    /// backend or a missing `JWT_SECRET`.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://data/sonaverse.db?mode=rwc".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = positive_secs(
            "REQUEST_TIMEOUT_SECS",
            &std::env::var("REQUEST_TIMEOUT_SECS").unwrap_or_else(|_| "30".into()),
        );

        let site_url = std::env::var("SITE_URL")
            .or_else(|_| std::env::var("NEXT_PUBLIC_SITE_URL"))
            .unwrap_or_else(|_| "http://localhost:3000".into());

        let environment = match std::env::var("APP_ENV")
            .or_else(|_| std::env::var("NODE_ENV"))
            .unwrap_or_default()
            .as_str()
        {
            "production" => AppEnv::Production,
            _ => AppEnv::Development,
        };

        let upload_dir = PathBuf::from(
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "public/uploads".into()),
        );

        let rate_limit_backend = match std::env::var("RATE_LIMIT_BACKEND")
            .unwrap_or_else(|_| "database".into())
            .as_str()
        {
            "database" => RateLimitBackend::Database,
            "memory" => RateLimitBackend::Memory,
            other => panic!("RATE_LIMIT_BACKEND must be 'database' or 'memory', got '{other}'"),
        };

        let session_purge_interval_secs = positive_secs(
            "SESSION_PURGE_INTERVAL_SECS",
            &std::env::var("SESSION_PURGE_INTERVAL_SECS").unwrap_or_else(|_| "3600".into()),
        );

        let bootstrap_admin = match (
            std::env::var("ADMIN_BOOTSTRAP_EMAIL"),
            std::env::var("ADMIN_BOOTSTRAP_PASSWORD"),
        ) {
            (Ok(email), Ok(password)) if !email.is_empty() && !password.is_empty() => {
                Some(BootstrapAdmin { email, password })
            }
            _ => None,
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            database_url,
            cors_origins,
            request_timeout_secs,
            site_url,
            environment,
            upload_dir,
            rate_limit_backend,
            session_purge_interval_secs,
            bootstrap_admin,
            jwt,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == AppEnv::Production
    }
}

/// Parse a duration in whole seconds that must be at least 1.
///
/// # Panics
///
/// Panics when `raw` is not a `u64` or is `0`.
fn positive_secs(name: &str, raw: &str) -> u64 {
    match raw.trim().parse::<u64>() {
        Ok(0) => panic!("{name} must be greater than 0"),
        Ok(secs) => secs,
        Err(e) => panic!("{name} must be a valid u64, got '{raw}': {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_secs_accepts_whole_seconds() {
        assert_eq!(positive_secs("SESSION_PURGE_INTERVAL_SECS", "3600"), 3600);
        assert_eq!(positive_secs("REQUEST_TIMEOUT_SECS", " 30 "), 30);
    }

    #[test]
    #[should_panic(expected = "SESSION_PURGE_INTERVAL_SECS must be greater than 0")]
    fn zero_purge_interval_rejected() {
        positive_secs("SESSION_PURGE_INTERVAL_SECS", "0");
    }

    #[test]
    #[should_panic(expected = "must be a valid u64")]
    fn malformed_secs_rejected() {
        positive_secs("REQUEST_TIMEOUT_SECS", "soon");
    }
}

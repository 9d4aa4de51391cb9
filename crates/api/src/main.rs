use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sonaverse_api::background::session_purge;
use sonaverse_api::bootstrap::ensure_admin;
use sonaverse_api::config::{RateLimitBackend, ServerConfig};
use sonaverse_api::rate_limit::RateLimiter;
use sonaverse_api::router::build_app_router;
use sonaverse_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sonaverse_api=debug,tower_http=debug".into());
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        environment = ?config.environment,
        rate_limit_backend = ?config.rate_limit_backend,
        "Loaded server configuration"
    );

    // --- Database ---
    if let Some(dir) = sqlite_parent_dir(&config.database_url) {
        std::fs::create_dir_all(&dir).expect("Failed to create database directory");
    }
    let pool = sonaverse_db::create_pool(&config.database_url)
        .await
        .expect("Failed to open database");
    sonaverse_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database ready");

    if let Some(bootstrap) = &config.bootstrap_admin {
        ensure_admin(&pool, bootstrap)
            .await
            .expect("Failed to bootstrap admin account");
    }

    std::fs::create_dir_all(&config.upload_dir).expect("Failed to create upload directory");

    // --- Background jobs ---
    let cancel = CancellationToken::new();
    let purge_handle = tokio::spawn(session_purge::run(
        pool.clone(),
        Duration::from_secs(config.session_purge_interval_secs),
        cancel.clone(),
    ));

    // --- App state ---
    let rate_limiter = match config.rate_limit_backend {
        RateLimitBackend::Database => RateLimiter::database(pool.clone()),
        RateLimitBackend::Memory => RateLimiter::memory(),
    };
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        rate_limiter: Arc::new(rate_limiter),
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), purge_handle).await;
    tracing::info!("Graceful shutdown complete");
}

/// Directory holding a file-backed SQLite database, if any.
fn sqlite_parent_dir(database_url: &str) -> Option<std::path::PathBuf> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = path.split('?').next()?;
    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    std::path::Path::new(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
}

/// Resolve on SIGINT or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

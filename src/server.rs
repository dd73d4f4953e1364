//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, store selection and the Axum server lifecycle.

use crate::api::middleware::rate_limit::RateLimit;
use crate::config::Config;
use crate::domain::repositories::{ResumeRepository, ShareRepository};
use crate::infrastructure::persistence::{
    PgResumeRepository, PgShareRepository, UnavailableStore,
};
use crate::routes::{RouterOptions, app_router};
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Creates a PostgreSQL pool from the configured pool settings.
///
/// # Errors
///
/// Returns an error if no database is configured or the connection fails.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is not configured")?;

    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(url)
        .await
        .context("Failed to connect to database")
}

/// Picks the record store handles for the application state.
///
/// Without a configured database every store call reports the store as
/// unavailable, so share resolution answers `503` instead of failing startup.
async fn build_store(
    config: &Config,
) -> Result<(Arc<dyn ShareRepository>, Arc<dyn ResumeRepository>)> {
    if !config.is_store_configured() {
        tracing::warn!("No database configured, share resolution will report 503");
        let store = Arc::new(UnavailableStore::new());
        let share_repository: Arc<dyn ShareRepository> = store.clone();
        let resume_repository: Arc<dyn ResumeRepository> = store;
        return Ok((share_repository, resume_repository));
    }

    let pool = connect_pool(config).await?;
    tracing::info!("Connected to database");

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to apply migrations")?;
        tracing::info!("Migrations applied");
    }

    let pool = Arc::new(pool);
    let share_repository: Arc<dyn ShareRepository> =
        Arc::new(PgShareRepository::new(pool.clone()));
    let resume_repository: Arc<dyn ResumeRepository> = Arc::new(PgResumeRepository::new(pool));
    Ok((share_repository, resume_repository))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (or the unavailable store)
/// - Apply migrations
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (share_repository, resume_repository) = build_store(&config).await?;
    let state = AppState::new(share_repository, resume_repository);

    let options = RouterOptions {
        rate_limit: RateLimit {
            replenish_secs: config.share_rate_interval_secs,
            burst_size: config.share_rate_burst,
            behind_proxy: config.behind_proxy,
        },
        cors_allowed_origins: config.cors_allowed_origins.clone(),
    };
    let app = app_router(state, &options)?;

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Ctrl-C received, shutting down"),
        _ = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}

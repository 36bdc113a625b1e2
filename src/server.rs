//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, storage client wiring and the Axum server lifecycle.

use crate::application::services::{BatchUploadOrchestrator, RegistrationService, UploadPipeline};
use crate::config::Config;
use crate::domain::storage::ObjectStorage;
use crate::infrastructure::persistence::PgMappingRepository;
use crate::infrastructure::storage::YandexDiskClient;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Storage provider client (when `DISK_TOKEN` is set)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The storage HTTP client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_database(&config).await?;
    run_migrations(&pool).await?;

    let state = build_state(&config, pool)?;
    let app = app_router(state, config.max_upload_bytes);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Applies the embedded migrations from `migrations/`.
///
/// # Errors
///
/// Returns an error if any migration fails to apply.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(())
}

async fn connect_database(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        max_connections = config.db_max_connections,
        "Connected to database"
    );

    Ok(pool)
}

/// Wires repositories, the storage client and services into [`AppState`].
///
/// Without a `DISK_TOKEN` the upload orchestrator is disabled and `/files`
/// answers 503.
pub fn build_state(config: &Config, pool: PgPool) -> Result<AppState> {
    let repository = Arc::new(PgMappingRepository::new(Arc::new(pool)));
    let registration = Arc::new(RegistrationService::new(repository, &config.base_url));

    let (uploads, storage) = match &config.disk_token {
        Some(token) => {
            let client = YandexDiskClient::new(
                &config.disk_api_base,
                token,
                config.upload_timeout(),
            )
            .context("Failed to build storage HTTP client")?;
            let storage: Arc<dyn ObjectStorage> = Arc::new(client);
            let pipeline = UploadPipeline::new(Arc::clone(&storage), config.upload_timeout());

            tracing::info!("File uploads enabled");
            (
                BatchUploadOrchestrator::new(Arc::new(pipeline)),
                Some(storage),
            )
        }
        None => {
            tracing::warn!("DISK_TOKEN not set, file uploads disabled");
            (BatchUploadOrchestrator::disabled(), None)
        }
    };

    Ok(AppState::new(registration, Arc::new(uploads), storage))
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C signal"),
        _ = terminate => tracing::info!("Received terminate signal"),
    }

    tracing::info!("Shutting down gracefully...");
}

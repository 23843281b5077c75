//! HTTP server initialization and runtime setup.
//!
//! Opens the document store, wires services into [`AppState`] and runs the
//! Axum server until Ctrl-C or SIGTERM.

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::DocumentRepository;
use crate::infrastructure::persistence::{MemoryDocumentRepository, PgDocumentRepository};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::session_token::TokenSigner;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Connects the PostgreSQL pool with the configured limits and applies
/// pending migrations.
///
/// # Errors
///
/// Returns an error if the connection or a migration fails.
pub async fn connect_database(config: &Config, database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;
    tracing::info!("Migrations applied");

    Ok(pool)
}

/// Opens the document store selected by `STORE_BACKEND`.
///
/// # Errors
///
/// Returns an error if the PostgreSQL store cannot be reached.
pub async fn open_store(config: &Config) -> Result<Arc<dyn DocumentRepository>> {
    let repository: Arc<dyn DocumentRepository> = match (config.store_backend, &config.database_url)
    {
        (StoreBackend::Postgres, Some(url)) => {
            let pool = connect_database(config, url).await?;
            Arc::new(PgDocumentRepository::new(Arc::new(pool)))
        }
        (StoreBackend::Postgres, None) => {
            anyhow::bail!("DATABASE_URL is required with the postgres backend")
        }
        (StoreBackend::Memory, _) => {
            tracing::warn!("Using in-memory document store; data is lost on restart");
            Arc::new(MemoryDocumentRepository::new())
        }
    };

    Ok(repository)
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The document store cannot be opened
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = open_store(&config).await?;

    let signer = TokenSigner::new(config.token_signing_secret.as_bytes(), config.token_ttl());
    let state = AppState::new(repository, signer);

    let app = app_router(state, config.behind_proxy);

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
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

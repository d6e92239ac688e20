//! BookBank API - question/answer bank over a single `bookBank` table
//!
//! Five endpoints map one-to-one onto parameterized SQL statements. The
//! database is contacted once at startup; a failure there is logged and the
//! listener starts anyway, so requests then fail with a server error.

mod config;
mod db;
mod error;
mod models;
mod routes;
mod state;

use crate::config::Settings;
use crate::db::PgBookStore;
use crate::routes::create_router;
use crate::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("🚀 Starting BookBank API...");

    let settings = Settings::load()?;
    info!("📋 Configuration loaded successfully");

    if let Some(port) = settings.server.ignored_port() {
        warn!(
            "⚠️  PORT is set to {} but the server always listens on {}",
            port, settings.server.port
        );
    }

    let pool = db::create_pool(&settings.database)?;

    // A failed connection is not fatal and the listener does not wait for it
    db::spawn_connection_check(pool.clone());

    let state = Arc::new(AppState::new(Arc::new(PgBookStore::new(pool))));
    let app = create_router(state);

    let addr = SocketAddr::from((settings.server.host, settings.server.port));

    info!("🌐 Server is running on port {}", addr.port());
    info!("📚 API Endpoints:");
    info!("   GET    /create-table - Create the bookBank table");
    info!("   GET    /data         - List all records");
    info!("   POST   /data         - Insert a record");
    info!("   PUT    /data/{{id}}    - Update a record");
    info!("   DELETE /data/{{id}}    - Delete a record");
    info!("   GET    /health       - Liveness check");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutdown complete");
    Ok(())
}

/// Initialize tracing with structured logging
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bookbank_api=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("📴 Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("📴 Received terminate signal, initiating graceful shutdown...");
        },
    }
}

//! Database access
//!
//! Builds the process-wide connection pool and defines the [`BookStore`]
//! seam the HTTP handlers talk to.

#[cfg(test)]
pub mod memory;
pub mod queries;
pub mod service;

pub use service::PgBookStore;

use crate::config::DatabaseConfig;
use crate::error::AppError;
use crate::models::{NewRecord, Record};
use async_trait::async_trait;
use deadpool_postgres::{Config, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime};
use tokio::task::JoinHandle;
use tokio_postgres::NoTls;
use tracing::{debug, error, info};

/// Operations the HTTP layer needs from the `bookBank` table.
///
/// Implementations perform no locking of their own; concurrent calls are
/// left to the underlying store.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Create the table if it does not exist. Safe to call repeatedly.
    async fn create_table(&self) -> Result<(), AppError>;

    /// All records, unordered.
    async fn list(&self) -> Result<Vec<Record>, AppError>;

    /// Insert a record and return the id the store assigned.
    async fn insert(&self, record: &NewRecord) -> Result<i32, AppError>;

    /// Replace `ques`/`ans` of the record with `id`. Returns rows affected.
    async fn update(&self, id: i32, record: &NewRecord) -> Result<u64, AppError>;

    /// Delete the record with `id`. Returns rows affected.
    async fn delete(&self, id: i32) -> Result<u64, AppError>;

    /// Touch the table without changing it. Fails when the store or the
    /// table is unavailable.
    async fn table_ready(&self) -> Result<(), AppError>;
}

/// deadpool settings for `config`. Connection attempts give up after
/// `config.connect_timeout` instead of waiting on the OS TCP timeout.
fn pool_config(config: &DatabaseConfig) -> Config {
    let mut cfg = Config::new();
    cfg.host = Some(config.host.clone());
    cfg.port = Some(config.port);
    cfg.user = Some(config.user.clone());
    cfg.password = Some(config.password.clone());
    cfg.dbname = Some(config.database.clone());
    cfg.manager = Some(ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    });
    cfg.pool = Some(PoolConfig::new(config.max_pool_size));
    cfg.connect_timeout = Some(config.connect_timeout);
    cfg
}

/// Create the connection pool described by `config`.
///
/// No connection is opened here; see [`spawn_connection_check`].
pub fn create_pool(config: &DatabaseConfig) -> Result<Pool, AppError> {
    let cfg = pool_config(config);

    let pool = if config.require_tls {
        let certs = rustls_native_certs::load_native_certs();
        let mut root_store = rustls::RootCertStore::empty();
        for cert in certs.certs {
            root_store.add(cert).ok();
        }

        let tls_config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        let tls = tokio_postgres_rustls::MakeRustlsConnect::new(tls_config);
        cfg.create_pool(Some(Runtime::Tokio1), tls)
    } else {
        cfg.create_pool(Some(Runtime::Tokio1), NoTls)
    }
    .map_err(|e| AppError::Config(format!("Failed to create pool: {}", e)))?;

    debug!(
        "Database pool configured for {}:{}/{} (TLS: {})",
        config.host, config.port, config.database, config.require_tls
    );
    Ok(pool)
}

/// Open one connection and run a trivial query against it.
async fn verify_connection(pool: &Pool) -> Result<(), AppError> {
    let client = pool.get().await?;
    client.query_one(queries::PING, &[]).await?;
    info!("Connected to the database!");
    Ok(())
}

/// Run [`verify_connection`] in the background and log a failure.
///
/// The listener must not wait on the database, so the caller never awaits
/// the returned handle before binding.
pub fn spawn_connection_check(pool: Pool) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = verify_connection(&pool).await {
            error!("❌ Error connecting to the database: {}", e);
        }
    })
}

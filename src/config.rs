//! Application configuration module
//!
//! Handles loading and validating configuration from environment variables.

use std::net::Ipv4Addr;
use std::time::Duration;
use thiserror::Error;

/// Port the HTTP listener is bound to. `PORT` does not change it.
pub const LISTEN_PORT: u16 = 8080;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: Ipv4Addr,
    pub port: u16,
    /// Value of `PORT`, kept only so a mismatch can be reported at startup
    pub requested_port: Option<u16>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::new(0, 0, 0, 0),
            port: LISTEN_PORT,
            requested_port: None,
        }
    }
}

impl ServerConfig {
    /// `PORT` when it names a port other than the one actually bound
    pub fn ignored_port(&self) -> Option<u16> {
        self.requested_port.filter(|p| *p != self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_pool_size: usize,
    pub require_tls: bool,
    /// Upper bound for opening one connection
    pub connect_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            database: "postgres".to_string(),
            max_pool_size: 10,
            require_tls: false,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Complete application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();

        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup (the process environment in production)
    pub fn from_source<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();
        let server = ServerConfig {
            host: get("HOST")
                .and_then(|h| h.parse().ok())
                .unwrap_or(defaults.host),
            port: defaults.port,
            requested_port: get("PORT").and_then(|p| p.trim().parse().ok()),
        };

        let max_pool_size = get("DB_MAX_CONNECTIONS")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| DatabaseConfig::default().max_pool_size);

        let connect_timeout = get("DB_CONNECT_TIMEOUT")
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| DatabaseConfig::default().connect_timeout);

        // DATABASE_URL wins over the individual DB_* variables
        let database = if let Some(database_url) = get("DATABASE_URL") {
            let mut database = Self::parse_database_url(&database_url)?;
            database.max_pool_size = max_pool_size;
            database.connect_timeout = connect_timeout;
            database
        } else {
            let defaults = DatabaseConfig::default();
            DatabaseConfig {
                host: get("DB_HOST").unwrap_or(defaults.host),
                port: get("DB_PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.port),
                user: get("DB_USER").unwrap_or(defaults.user),
                password: get("DB_PASS").unwrap_or(defaults.password),
                database: get("DB_NAME").unwrap_or(defaults.database),
                max_pool_size,
                connect_timeout,
                require_tls: get("DB_SSLMODE")
                    .map(|mode| mode.eq_ignore_ascii_case("require"))
                    .unwrap_or(defaults.require_tls),
            }
        };

        Ok(Self { server, database })
    }

    /// Parse a DATABASE_URL connection string (postgresql://...)
    fn parse_database_url(url: &str) -> Result<DatabaseConfig, ConfigError> {
        let parsed = url::Url::parse(url).map_err(|_| {
            ConfigError::InvalidValue(
                "Invalid DATABASE_URL format (expected postgresql://...)".to_string(),
            )
        })?;

        let host = parsed
            .host_str()
            .ok_or_else(|| ConfigError::InvalidValue("Missing host in DATABASE_URL".to_string()))?
            .to_string();

        let database = parsed.path().trim_start_matches('/').to_string();
        if database.is_empty() {
            return Err(ConfigError::InvalidValue(
                "Missing database name in DATABASE_URL".to_string(),
            ));
        }

        let require_tls = parsed
            .query_pairs()
            .any(|(key, value)| key == "sslmode" && value == "require");

        Ok(DatabaseConfig {
            host,
            port: parsed.port().unwrap_or(5432),
            user: parsed.username().to_string(),
            password: parsed.password().map(|p| p.to_string()).unwrap_or_default(),
            database,
            require_tls,
            ..DatabaseConfig::default()
        })
    }
}

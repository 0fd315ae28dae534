/**
 * Server Configuration
 *
 * This module loads the server configuration from environment variables
 * (after `.env` has been read by the binary) and opens the optional
 * PostgreSQL connection pool.
 *
 * # Configuration Sources
 *
 * | variable                 | default                   |
 * |--------------------------|---------------------------|
 * | `DATABASE_URL`           | unset: in-memory store    |
 * | `DATABASE_NAME`          | taken from the URL        |
 * | `SERVER_HOST`            | `0.0.0.0`                 |
 * | `SERVER_PORT`            | `8080`                    |
 * | `JWT_SECRET`             | development key (warned)  |
 * | `ACCESS_TOKEN_TTL_SECS`  | `3600`                    |
 * | `REFRESH_TOKEN_TTL_SECS` | `172800`                  |
 * | `BCRYPT_COST`            | `bcrypt::DEFAULT_COST`    |
 * | `UPLOAD_DIR`             | `images`                  |
 * | `PUBLIC_BASE_URL`        | `http://localhost:<port>` |
 * | `MAX_UPLOAD_BYTES`       | 10 MiB                    |
 *
 * # Error Handling
 *
 * A malformed value is a startup error (`ConfigError::Invalid`); a missing one
 * falls back to its default.
 */
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use thiserror::Error;

const DEV_JWT_SECRET: &str = "emporium-development-secret-change-me";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ACCESS_TTL_SECS: u64 = 60 * 60;
const DEFAULT_REFRESH_TTL_SECS: u64 = 48 * 60 * 60;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Lowest work factor bcrypt accepts
pub const MIN_BCRYPT_COST: u32 = 4;
/// Highest work factor bcrypt accepts
pub const MAX_BCRYPT_COST: u32 = 31;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },

    #[error("failed to connect to database: {0}")]
    Database(#[from] sqlx::Error),
}

/// Server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub bcrypt_cost: u32,
    pub upload_dir: PathBuf,
    pub public_base_url: String,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            database_name: None,
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            access_token_ttl: Duration::from_secs(DEFAULT_ACCESS_TTL_SECS),
            refresh_token_ttl: Duration::from_secs(DEFAULT_REFRESH_TTL_SECS),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            upload_dir: PathBuf::from("images"),
            public_base_url: format!("http://localhost:{DEFAULT_PORT}"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = parse_or(&get, "SERVER_PORT", defaults.port)?;

        let jwt_secret = get("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set. Using the development key; do not run this in production.");
            defaults.jwt_secret.clone()
        });

        let bcrypt_cost: u32 = parse_or(&get, "BCRYPT_COST", defaults.bcrypt_cost)?;
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(Self {
            database_url: get("DATABASE_URL"),
            database_name: get("DATABASE_NAME"),
            host: get("SERVER_HOST").unwrap_or(defaults.host),
            port,
            jwt_secret,
            access_token_ttl: Duration::from_secs(parse_or(
                &get,
                "ACCESS_TOKEN_TTL_SECS",
                DEFAULT_ACCESS_TTL_SECS,
            )?),
            refresh_token_ttl: Duration::from_secs(parse_or(
                &get,
                "REFRESH_TOKEN_TTL_SECS",
                DEFAULT_REFRESH_TTL_SECS,
            )?),
            bcrypt_cost,
            upload_dir: get("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            public_base_url: get("PUBLIC_BASE_URL")
                .unwrap_or_else(|| format!("http://localhost:{port}")),
            max_upload_bytes: parse_or(&get, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
        })
    }

    /// `host:port` to bind the listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

/// Builder used by tests and embedders
#[derive(Debug, Clone, Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = Some(url.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.jwt_secret = secret.into();
        self
    }

    pub fn access_token_ttl(mut self, ttl: Duration) -> Self {
        self.config.access_token_ttl = ttl;
        self
    }

    pub fn refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.config.refresh_token_ttl = ttl;
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    pub fn upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.upload_dir = dir.into();
        self
    }

    pub fn public_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.public_base_url = url.into();
        self
    }

    pub fn max_upload_bytes(mut self, bytes: usize) -> Self {
        self.config.max_upload_bytes = bytes;
        self
    }

    pub fn build(self) -> ServerConfig {
        self.config
    }
}

/// Open the PostgreSQL pool and run migrations
///
/// Returns `Ok(None)` when `DATABASE_URL` is not set, in which case the
/// server runs on the in-memory store. A configured database that cannot be
/// reached is an error.
pub async fn load_database(config: &ServerConfig) -> Result<Option<PgPool>, ConfigError> {
    let Some(url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Using the in-memory store; data will not survive a restart.");
        return Ok(None);
    };

    let mut options = PgConnectOptions::from_str(url)?;
    if let Some(name) = &config.database_name {
        options = options.database(name);
    }

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(()) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Ok(Some(pool))
}

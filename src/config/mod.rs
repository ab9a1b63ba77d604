//! Application configuration loaded from environment.

use std::net::SocketAddr;

/// Default token lifetime in seconds (1 hour).
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Application configuration loaded from `.env` and environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g. `0.0.0.0:3000`).
    pub server_addr: SocketAddr,
    /// Token signing secret. Required; there is no default on purpose —
    /// a secret baked into the binary would invalidate nothing on rotation
    /// and leak with the source.
    pub jwt_secret: String,
    /// Lifetime of issued tokens, in seconds.
    pub token_ttl_secs: i64,
    /// Log level: `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment. Call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        let server_addr = std::env::var("SERVER_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let server_addr: SocketAddr = server_addr
            .parse()
            .map_err(|_| ConfigLoadError::InvalidServerAddr)?;

        let jwt_secret = std::env::var("JWT_SECRET")
            .map_err(|_| ConfigLoadError::MissingJwtSecret)?;

        let token_ttl_secs = match std::env::var("TOKEN_TTL_SECS") {
            Ok(v) => v.parse().map_err(|_| ConfigLoadError::InvalidTokenTtl)?,
            Err(_) => DEFAULT_TOKEN_TTL_SECS,
        };

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            server_addr,
            jwt_secret,
            token_ttl_secs,
            log_level,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Invalid SERVER_ADDR")]
    InvalidServerAddr,
    #[error("JWT_SECRET must be set")]
    MissingJwtSecret,
    #[error("Invalid TOKEN_TTL_SECS")]
    InvalidTokenTtl,
}

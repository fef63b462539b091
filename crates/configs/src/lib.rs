//! Layered configuration for the Inkcap binaries.
//!
//! Values come from the environment (`__` as the section separator, e.g.
//! `SERVER__PORT=4000`, `AUTH__JWT_SECRET=...`), with a `.env` file loaded
//! first and sane development defaults underneath.

use std::path::PathBuf;

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[cfg(feature = "db-mongo")]
    pub database: DatabaseConfig,
    #[cfg(feature = "auth-jwt")]
    pub auth: AuthConfig,
    #[cfg(feature = "media-local")]
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin of the browser client, allowed by the CORS policy.
    pub client_origin: String,
}

#[cfg(feature = "db-mongo")]
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string; kept secret because it may embed credentials.
    pub uri: SecretString,
    pub name: String,
}

#[cfg(feature = "auth-jwt")]
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: SecretString,
    pub token_ttl_hours: i64,
}

#[cfg(feature = "media-local")]
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    /// Directory cover images are written to and served from.
    pub root: PathBuf,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        #[allow(unused_mut)]
        let mut builder = config::Config::builder()
            .add_source(config::Environment::default().separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 4000)?
            .set_default("server.client_origin", "http://localhost:3000")?;

        #[cfg(feature = "db-mongo")]
        {
            builder = builder
                .set_default("database.uri", "mongodb://localhost:27017")?
                .set_default("database.name", "inkcap")?;
        }
        #[cfg(feature = "auth-jwt")]
        {
            builder = builder
                .set_default("auth.jwt_secret", "development-secret-change-in-production")?
                .set_default("auth.token_ttl_hours", 24)?;
        }
        #[cfg(feature = "media-local")]
        {
            builder = builder
                .set_default("media.root", "uploads")?
                .set_default("media.max_upload_bytes", 10 * 1024 * 1024)?;
        }

        let config = builder.build()?;
        tracing::debug!("configuration assembled from environment");
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_environment() {
        let config = Config::load().expect("defaults should satisfy the schema");
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.client_origin, "http://localhost:3000");
    }
}

use std::{env, net::SocketAddr};

use secrecy::SecretString;
use services::services::claude_api::DEFAULT_BASE_URL;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT {0:?}")]
    InvalidPort(String),
    #[error("invalid listen address {0:?}")]
    InvalidAddress(String),
}

/// Process configuration, read once at start-up.
#[derive(Debug)]
pub struct Config {
    pub anthropic_api_key: Option<SecretString>,
    pub anthropic_base_url: String,
    pub claude_model: Option<String>,
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            anthropic_base_url: DEFAULT_BASE_URL.to_string(),
            claude_model: None,
            database_url: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };

        Ok(Self {
            anthropic_api_key: get("ANTHROPIC_API_KEY").map(SecretString::from),
            anthropic_base_url: get("ANTHROPIC_BASE_URL").unwrap_or(defaults.anthropic_base_url),
            claude_model: get("CLAUDE_MODEL"),
            database_url: get("DATABASE_URL"),
            host: get("HOST").unwrap_or(defaults.host),
            port,
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::InvalidAddress(addr))
    }
}

//! Server configuration, read from the environment (and `.env` if present).

use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a port number, got '{0}'")]
    InvalidPort(String),

    #[error("Invalid listen address '{0}'")]
    InvalidAddress(String),

    #[error("PLANNER_STORE must be 'mongo' or 'memory', got '{0}'")]
    UnknownStore(String),

    #[error("MONGODB_URL is not set")]
    MissingMongoUrl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    /// `database` is `MONGODB_DB`; unset means the one named in `url`.
    Mongo { url: String, database: Option<String> },
    Memory,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreKind,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match get("PORT") {
            Some(p) => p.parse().map_err(|_| ConfigError::InvalidPort(p))?,
            None => DEFAULT_PORT,
        };

        let store = match get("PLANNER_STORE").as_deref().unwrap_or("mongo") {
            "mongo" => StoreKind::Mongo {
                url: get("MONGODB_URL").ok_or(ConfigError::MissingMongoUrl)?,
                database: get("MONGODB_DB"),
            },
            "memory" => StoreKind::Memory,
            other => return Err(ConfigError::UnknownStore(other.to_string())),
        };

        Ok(ServerConfig { host, port, store })
    }

    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::InvalidAddress(addr))
    }
}

use std::net::SocketAddr;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use serde::Deserialize;

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Configuration for the application
///
/// Only `DATABASE_URL` and `DB_NAME` select the SQLite database; `DB_USER`,
/// `DB_PASSWORD`, `DB_HOST` and `DB_PORT` are not read.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Database connection URL, takes precedence over `DB_NAME`
    #[serde(default)]
    pub database_url: Option<String>,

    /// Upper bound on pooled connections
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    /// Name of the SQLite file used when no URL is given
    #[serde(default = "default_db_name")]
    pub db_name: String,

    /// Address the HTTP listener binds to
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_max_connections() -> u32 {
    5
}

fn default_db_name() -> String {
    "test".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>().context("invalid environment configuration")?;

        Ok(config)
    }

    /// The database URL, falling back to a SQLite file named after `DB_NAME`
    pub fn database_url(&self) -> String {
        match &self.database_url {
            Some(url) => url.clone(),
            None => format!("sqlite://{}.db", self.db_name),
        }
    }

    /// Socket address for the HTTP listener
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse::<SocketAddr>()
            .with_context(|| format!("invalid bind address {addr}"))
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    Config::load()
}

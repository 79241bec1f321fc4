//! Configuration management
//!
//! Loads settings from an optional TOML file and environment variables,
//! with documented defaults for every value. Consumed as plain values by
//! the bootstrap; the dispatcher never sees it directly.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub chroma: ChromaConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Chroma backend connection parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChromaConfig {
    /// ChromaDB server hostname
    #[serde(default = "default_chroma_host")]
    pub host: String,

    /// ChromaDB server port
    #[serde(default = "default_chroma_port")]
    pub port: u16,

    /// Use TLS for the backend connection
    #[serde(default)]
    pub ssl: bool,
}

/// MCP HTTP server bind parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,

    #[serde(default = "default_server_port")]
    pub port: u16,
}

fn default_chroma_host() -> String {
    "chroma-db".to_string()
}

fn default_chroma_port() -> u16 {
    8000
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8013
}

impl Default for ChromaConfig {
    fn default() -> Self {
        Self {
            host: default_chroma_host(),
            port: default_chroma_port(),
            ssl: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML file > defaults
    ///
    /// The file location is named by CHROMA_MCP_CONFIG; without it the
    /// defaults are used directly.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = if let Ok(config_path) = env::var("CHROMA_MCP_CONFIG") {
            Self::from_file(config_path)?
        } else {
            Self::default()
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(host) = env::var("CHROMA_HOST") {
            self.chroma.host = host;
        }
        if let Ok(port) = env::var("CHROMA_PORT") {
            if let Ok(port) = port.parse() {
                self.chroma.port = port;
            }
        }
        if let Ok(ssl) = env::var("CHROMA_SSL") {
            if let Ok(ssl) = ssl.parse() {
                self.chroma.ssl = ssl;
            }
        }

        if let Ok(host) = env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("SERVER_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chroma.host.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Chroma host must be non-empty".to_string(),
            ));
        }
        if self.chroma.port == 0 {
            return Err(ConfigError::Invalid(
                "Chroma port must be non-zero".to_string(),
            ));
        }
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Server host must be non-empty".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Invalid(
                "Server port must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log the effective configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Chroma host: {}", self.chroma.host);
        tracing::info!("  Chroma port: {}", self.chroma.port);
        tracing::info!("  Chroma TLS: {}", self.chroma.ssl);
        tracing::info!("  Bind host: {}", self.server.host);
        tracing::info!("  Bind port: {}", self.server.port);
    }
}

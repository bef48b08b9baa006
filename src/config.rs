//! Configuration for the anomaly run

use serde::{Deserialize, Serialize};

use crate::error::{AnomalyError, Result};

/// Default configuration file path, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "database.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub postgres: PostgresConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            username: "postgres".to_string(),
            password: "postgres".to_string(),
            database: "adventureworks".to_string(),
            max_connections: 5,
            acquire_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    ///
    /// A missing file or a file without the `[postgres]` section is a
    /// fatal configuration error, reported before any connection is
    /// attempted.
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AnomalyError::Configuration(format!("cannot read {path}: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| AnomalyError::Configuration(format!("invalid config {path}: {e}")))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.postgres.host.is_empty() {
            return Err(AnomalyError::Configuration(
                "postgres host cannot be empty".to_string(),
            ));
        }
        if self.postgres.database.is_empty() {
            return Err(AnomalyError::Configuration(
                "postgres database cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl PostgresConfig {
    /// Assemble the server URL from the configured parts.
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database
        )
    }
}

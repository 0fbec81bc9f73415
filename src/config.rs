use crate::domain::{Granularity, Tolerance};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    pub registry_path: String,
    pub granularity: Granularity,
    pub sync_tolerance: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_path = env_map
            .get("DATABASE_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_PATH".to_string()))?;

        let registry_path = env_map
            .get("REGISTRY_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("REGISTRY_PATH".to_string()))?;

        let granularity = env_map
            .get("REPORT_GRANULARITY")
            .map(|s| s.as_str())
            .unwrap_or("daily")
            .parse::<Granularity>()
            .map_err(|reason| ConfigError::InvalidValue("REPORT_GRANULARITY".to_string(), reason))?;

        let sync_tolerance = env_map
            .get("SYNC_TOLERANCE")
            .map(|s| s.as_str())
            .unwrap_or("1")
            .parse::<u32>()
            .ok()
            .filter(|amount| *amount > 0)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "SYNC_TOLERANCE".to_string(),
                    "must be a positive integer".to_string(),
                )
            })?;

        Ok(Config {
            port,
            database_path,
            registry_path,
            granularity,
            sync_tolerance,
        })
    }

    /// Lag window used when resolving the synced timestamp.
    pub fn tolerance(&self) -> Tolerance {
        Tolerance::new(self.sync_tolerance, self.granularity)
    }
}

//! Server configuration
//!
//! Defaults match the fixed values the service has always used; each can be
//! overridden from the environment (`BULLETIN_BIND_ADDRESS`,
//! `BULLETIN_DATABASE_PATH`).

use crate::error::Result;
use ::config::{builder::DefaultState, Config, ConfigBuilder, Environment};
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:1400";
pub const DEFAULT_DATABASE_PATH: &str = "shellhacks.db";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub database_path: PathBuf,
}

impl ServerConfig {
    /// Load configuration from defaults and `BULLETIN_*` environment variables
    pub fn load() -> Result<Self> {
        Self::from_builder(Config::builder().add_source(environment()))
    }

    /// Resolve a configuration from an arbitrary builder, filling in defaults
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config = builder
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("database_path", DEFAULT_DATABASE_PATH)?
            .build()?
            .try_deserialize()?;

        Ok(config)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("BULLETIN")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_builder(Config::builder()).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:1400");
        assert_eq!(config.database_path, PathBuf::from("shellhacks.db"));

        let fallback = ServerConfig::default();
        assert_eq!(fallback.bind_address, config.bind_address);
        assert_eq!(fallback.database_path, config.database_path);
    }

    #[test]
    fn test_overrides() {
        let builder = Config::builder()
            .set_override("bind_address", "127.0.0.1:8080")
            .unwrap()
            .set_override("database_path", "/tmp/bulletin.db")
            .unwrap();

        let config = ServerConfig::from_builder(builder).unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:8080");
        assert_eq!(config.database_path, PathBuf::from("/tmp/bulletin.db"));
    }

    #[test]
    fn test_environment_overrides() {
        let vars: ::config::Map<String, String> = [
            ("BULLETIN_BIND_ADDRESS", "127.0.0.1:9400"),
            ("BULLETIN_DATABASE_PATH", "/var/lib/bulletin/events.db"),
            ("OTHER_DATABASE_PATH", "/ignored.db"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let builder = Config::builder().add_source(environment().source(Some(vars)));

        let config = ServerConfig::from_builder(builder).unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:9400");
        assert_eq!(
            config.database_path,
            PathBuf::from("/var/lib/bulletin/events.db")
        );
    }

    #[test]
    fn test_environment_partial_override_keeps_defaults() {
        let vars: ::config::Map<String, String> =
            [("BULLETIN_DATABASE_PATH".to_string(), "other.db".to_string())]
                .into_iter()
                .collect();

        let builder = Config::builder().add_source(environment().source(Some(vars)));

        let config = ServerConfig::from_builder(builder).unwrap();
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.database_path, PathBuf::from("other.db"));
    }
}

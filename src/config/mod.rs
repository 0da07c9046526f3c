// Configuration module

mod models;

pub use models::*;

use crate::error::{GatewayError, Result};
use config::{Config, Environment, File};
use std::path::PathBuf;

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest)
    /// 2. Config file
    /// 3. Defaults (lowest)
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, reading an explicit config file path instead
    /// of the default `~/.trilingo/config.toml` when one is given. An
    /// explicit path must exist; the default path may be absent.
    pub fn load_from(path: Option<&str>) -> Result<Self> {
        let file_source = match path {
            Some(p) => File::with_name(p).required(true),
            None => File::with_name(&Self::default_config_path()).required(false),
        };

        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file_source)
            // Override with environment variables (prefix: TRILINGO_)
            .add_source(Environment::with_prefix("TRILINGO").separator("_"))
            .build()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        let mut config: AppConfig = config
            .try_deserialize()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        // The deployment convention inherited from the serverless version:
        // the key lives in GEMINI_API_KEY, not in the config file.
        if config.gemini.api_key.is_empty() {
            if let Ok(key) = std::env::var("GEMINI_API_KEY") {
                config.gemini.api_key = key;
            }
        }

        Ok(config)
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".trilingo")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}

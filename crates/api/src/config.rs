//! Service Configuration
//!
//! Layered: built-in defaults, then an optional config file (`HEART_CONFIG`
//! or `heart-predict.{toml,yaml,json}`), then `HEART__*` environment
//! variables such as `HEART__SERVER__ADDR`.

use config::{Config, ConfigError, Environment, File};
use inference_engine::ModelFormat;
use serde::{Deserialize, Serialize};

use crate::rate_limit::RateLimitConfig;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "HEART_CONFIG";

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub addr: String,
}

/// Model artifact settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    pub path: String,
    pub format: ModelFormat,
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Max level: trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

/// Complete service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub model: ModelSettings,
    pub logging: LoggingSettings,
    pub rate_limit: RateLimitConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                addr: "0.0.0.0:8080".to_string(),
            },
            model: ModelSettings {
                path: "models/final_log_reg_model.json".to_string(),
                format: ModelFormat::Json,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
                json: false,
            },
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from all layers
    pub fn load() -> Result<Self, ConfigError> {
        let file = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "heart-predict".to_string());
        Self::build(File::with_name(&file).required(false), "HEART")
    }

    fn build(
        file: impl config::Source + Send + Sync + 'static,
        env_prefix: &str,
    ) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(file)
            .add_source(
                Environment::with_prefix(env_prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

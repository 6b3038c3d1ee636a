//! Configuration management utilities

use serde::{Deserialize, Serialize};

/// Application-level configuration shared by all binaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Application version reported by the health endpoint
    pub version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "finagent".to_string(),
            environment: "development".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Config {
    /// Build a config from `APP_NAME` and `APP_ENV`, keeping defaults for unset vars
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            app_name: std::env::var("APP_NAME").unwrap_or(defaults.app_name),
            environment: std::env::var("APP_ENV").unwrap_or(defaults.environment),
            version: defaults.version,
        }
    }
}

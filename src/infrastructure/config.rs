//! Configuration loading and management.
//!
//! Settings are organized by concern (API endpoint, catalog defaults,
//! logging) and persisted as a single JSON file. Missing files and missing
//! fields fall back to defaults so a fresh install needs no setup.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};

use crate::domain::pagination::DEFAULT_ITEMS_PER_PAGE;

/// Environment variable overriding the configured API base URL.
pub const API_URL_ENV: &str = "CATALOG_API_URL";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

/// Remote API endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the products API.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Maximum attempts for transient failures.
    pub max_retries: u32,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:3000/api"),
            timeout_seconds: 10,
            max_retries: 3,
            user_agent: String::from("storefront-catalog/0.1"),
        }
    }
}

/// Catalog view defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Page size for catalog views.
    pub items_per_page: u32,
    /// Upper bound of the default price range filter.
    pub default_price_max: f64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            default_price_max: 1000.0,
        }
    }
}

/// Logging output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter when RUST_LOG is not set.
    pub level: String,
    /// Also write log output to a rolling file.
    pub log_to_file: bool,
    /// Directory for log files.
    pub directory: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            log_to_file: false,
            directory: PathBuf::from("logs"),
        }
    }
}

/// Loads and saves the application configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Manager over the default per-user configuration path.
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("could not determine user config directory"))?
            .join("storefront-catalog");
        Ok(Self {
            config_path: config_dir.join("config.json"),
        })
    }

    /// Manager over an explicit path.
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load the configuration, falling back to defaults when the file does
    /// not exist. The `CATALOG_API_URL` environment variable overrides the
    /// configured base URL either way.
    pub async fn load(&self) -> Result<AppConfig> {
        let mut config = if self.config_path.exists() {
            let raw = fs::read_to_string(&self.config_path)
                .await
                .with_context(|| format!("failed to read {}", self.config_path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("malformed config at {}", self.config_path.display()))?
        } else {
            debug!(path = %self.config_path.display(), "no config file, using defaults");
            AppConfig::default()
        };

        if let Ok(base_url) = std::env::var(API_URL_ENV) {
            if !base_url.is_empty() {
                info!(%base_url, "API base URL overridden from environment");
                config.api.base_url = base_url;
            }
        }

        Ok(config)
    }

    /// Persist the configuration, creating parent directories as needed.
    pub async fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(config).context("failed to serialize config")?;
        fs::write(&self.config_path, raw)
            .await
            .with_context(|| format!("failed to write {}", self.config_path.display()))?;
        info!(path = %self.config_path.display(), "configuration saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_path(dir.path().join("config.json"));

        let config = manager.load().await.expect("defaults");
        assert_eq!(config.api.timeout_seconds, 10);
        assert_eq!(config.catalog.items_per_page, DEFAULT_ITEMS_PER_PAGE);
    }

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let dir = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_path(dir.path().join("nested/config.json"));

        let mut config = AppConfig::default();
        config.api.base_url = String::from("https://shop.example.com/api");
        config.catalog.items_per_page = 24;
        manager.save(&config).await.expect("saved");

        let loaded = manager.load().await.expect("loaded");
        assert_eq!(loaded.api.base_url, "https://shop.example.com/api");
        assert_eq!(loaded.catalog.items_per_page, 24);
    }

    #[tokio::test]
    async fn partial_file_fills_missing_sections_with_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, r#"{"api": {"timeout_seconds": 30}}"#)
            .await
            .expect("written");

        let config = ConfigManager::with_path(&path).load().await.expect("loaded");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.api.max_retries, 3);
        assert_eq!(config.catalog.default_price_max, 1000.0);
    }
}

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::feed::FeedConfig;
use super::logging::LoggingConfig;
use super::resolver::{ResolverConfig, MAX_RESOLVER_ENDPOINTS};
use super::storage::StorageConfig;

/// Main configuration structure for cdnsight
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Blocklist feed source
    #[serde(default)]
    pub feed: FeedConfig,

    /// Fallback DNS-over-HTTPS resolvers
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Persisted per-tab status
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. cdnsight.toml in current directory
    /// 3. /etc/cdnsight/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("cdnsight.toml").exists() {
            Self::from_file("cdnsight.toml")?
        } else if std::path::Path::new("/etc/cdnsight/config.toml").exists() {
            Self::from_file("/etc/cdnsight/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(db) = overrides.database_path {
            self.storage.path = db;
        }
        if overrides.no_storage {
            self.storage.enabled = false;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(url) = overrides.feed_url {
            self.feed.url = url;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feed.url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Blocklist feed URL cannot be empty".to_string(),
            ));
        }

        if self.resolver.endpoints.is_empty() {
            return Err(ConfigError::Validation(
                "No resolver endpoints configured".to_string(),
            ));
        }

        if self.resolver.endpoints.len() > MAX_RESOLVER_ENDPOINTS {
            return Err(ConfigError::Validation(format!(
                "At most {} resolver endpoints are supported, got {}",
                MAX_RESOLVER_ENDPOINTS,
                self.resolver.endpoints.len()
            )));
        }

        if let Some(blank) = self.resolver.endpoints.iter().position(|e| e.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "Resolver endpoint #{} is empty",
                blank + 1
            )));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub database_path: Option<String>,
    pub no_storage: bool,
    pub log_level: Option<String>,
    pub feed_url: Option<String>,
}

//! Harness configuration.
//!
//! Aggregates configuration from all modules into a single `HarnessConfig`
//! that is loaded once per process from YAML files and environment
//! variables, then shared read-only for the rest of the run.

mod assets;
mod browser;
mod fixtures;

pub use assets::{AssetConfig, AssetPaths, AssetTools};
pub use browser::{AppConfig, BrowserConfig, BrowserEngine};
pub use fixtures::{FixtureConfig, FixtureStoreType};

use serde::Deserialize;
use url::Url;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "features.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "RUSTODON_FEATURES_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "RUSTODON_FEATURES";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "RUSTODON_FEATURES_LOG";
/// Environment variable overriding the application base URL.
pub const BASE_URL_ENV_VAR: &str = "BASE_URL";
/// Environment variable for database URL.
pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Migration command cannot be empty")]
    EmptyMigrationCommand,
}

/// Main harness configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Application under test.
    pub app: AppConfig,
    /// WebDriver session settings.
    pub browser: BrowserConfig,
    /// Per-scenario database reset.
    pub fixtures: FixtureConfig,
    /// Build-time asset pipeline.
    pub assets: AssetConfig,
}

impl HarnessConfig {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `features.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix
    /// 5. `BASE_URL` and `DATABASE_URL`
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("app.base_url", std::env::var(BASE_URL_ENV_VAR).ok())?
            .set_override_option(
                "fixtures.database_url",
                std::env::var(DATABASE_URL_ENV_VAR).ok(),
            )?
            .build()?;

        let config: HarnessConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Create config for testing.
    pub fn for_test() -> Self {
        Self::default()
    }

    /// Check the values the harness cannot run without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.app.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.app.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.app.base_url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if self.fixtures.migration_command.is_empty() {
            return Err(ConfigError::EmptyMigrationCommand);
        }
        Ok(())
    }
}

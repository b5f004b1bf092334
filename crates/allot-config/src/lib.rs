//! # allot-config
//!
//! Layered configuration loading for Allot using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ALLOT_*` prefix, `__` as separator)
//! 2. Project-level `.allot/config.toml`
//! 3. User-level `~/.config/allot/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ALLOT_ENGINE__DEFAULT_QUOTA` -> `engine.default_quota`,
//! `ALLOT_STORE__PATH` -> `store.path`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use allot_config::AllotConfig;
//!
//! let config = AllotConfig::load_with_dotenv().expect("config");
//! println!("default quota: {}", config.engine.default_quota);
//! ```

mod engine;
mod error;
mod store;

pub use engine::{EngineConfig, MAX_BATCH_SIZE};
pub use error::ConfigError;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AllotConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl AllotConfig {
    /// Load configuration from all sources, with the project-local file read
    /// from `.allot/config.toml` under the current directory.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::figment())
    }

    /// Load configuration for a specific project root.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_for_project(project_root: &Path) -> Result<Self, ConfigError> {
        Self::extract(Self::figment_at(Some(project_root)))
    }

    /// Load configuration with `.env` file support from the current directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain rooted at the current directory.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_at(None)
    }

    /// Build the figment provider chain, reading the project-local file from
    /// `<project_root>/.allot/config.toml` when a root is given.
    #[must_use]
    pub fn figment_at(project_root: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = project_root.map_or_else(
            || PathBuf::from(".allot/config.toml"),
            |root| root.join(".allot").join("config.toml"),
        );
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("ALLOT_").split("__"))
    }

    /// Check every section for out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("allot").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = AllotConfig::default();
        assert_eq!(config.engine.default_quota, 5);
        assert!(config.store.path.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: AllotConfig = AllotConfig::figment().extract()?;
            assert_eq!(config.engine.batch_size, MAX_BATCH_SIZE);
            assert_eq!(config.engine.institution_prefix, "UP");
            Ok(())
        });
    }
}

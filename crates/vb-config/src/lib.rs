//! # vb-config
//!
//! Layered configuration loading for Vaultbook using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`VAULTBOOK_*` prefix, `__` as separator)
//! 2. Project-level `.vaultbook/config.toml`
//! 3. User-level `~/.config/vaultbook/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `VAULTBOOK_GENERAL__DB_PATH` -> `general.db_path`,
//! `VAULTBOOK_SECURITY__UNAVAILABLE_POLICY` -> `security.unavailable_policy`.
//!
//! ```no_run
//! use vb_config::VaultConfig;
//!
//! let config = VaultConfig::load_with_dotenv().expect("config");
//! println!("policy: {}", config.security.unavailable_policy);
//! ```

mod error;
mod general;
mod security;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use security::SecurityConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = ".vaultbook/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VaultConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub security: SecurityConfig,
}

impl VaultConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` on malformed TOML or mistyped values,
    /// and `ConfigError::InvalidValue` when validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect it or stack providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("VAULTBOOK_").split("__"))
    }

    /// Check cross-field constraints figment cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.security.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vaultbook").join("config.toml"))
    }
}

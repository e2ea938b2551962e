//! General application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Database file. Empty means `<data_dir>/vaultbook/vaultbook.db`.
    #[serde(default)]
    pub db_path: String,

    /// Insert demo business rows into empty tables on open.
    #[serde(default)]
    pub seed_sample_data: bool,
}

impl GeneralConfig {
    /// Resolve the database path, falling back to the platform data dir.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Unresolved` when `db_path` is empty and the
    /// platform reports no data directory.
    pub fn resolved_db_path(&self) -> Result<PathBuf, ConfigError> {
        if !self.db_path.trim().is_empty() {
            return Ok(PathBuf::from(&self.db_path));
        }
        dirs::data_dir()
            .map(|dir| dir.join("vaultbook").join("vaultbook.db"))
            .ok_or_else(|| ConfigError::Unresolved {
                field: "general.db_path".into(),
                reason: "no platform data directory; set db_path explicitly".into(),
            })
    }
}

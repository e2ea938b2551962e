//! Key/value settings, including the persisted security intent.

use crate::error::DatabaseError;
use crate::service::VaultService;

/// Settings key holding `"true"` or `"false"`.
pub const SECURITY_ENABLED_KEY: &str = "security_enabled";

impl VaultService {
    /// Insert or replace one setting.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the upsert fails.
    pub async fn set_setting(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.db()
            .conn()
            .execute(
                "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
                 ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
                libsql::params![key, value],
            )
            .await?;
        Ok(())
    }

    /// Stored value for `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the query fails.
    pub async fn get_setting(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT value FROM settings WHERE key = ?1", [key])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row.get::<String>(0)?)),
            None => Ok(None),
        }
    }

    /// Persisted security intent, or `default` when never set.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if the stored value is not a
    /// boolean, or `DatabaseError::LibSql` if the query fails.
    pub async fn security_enabled(&self, default: bool) -> Result<bool, DatabaseError> {
        match self.get_setting(SECURITY_ENABLED_KEY).await? {
            None => Ok(default),
            Some(value) => value.parse::<bool>().map_err(|_| {
                DatabaseError::InvalidState(format!(
                    "setting '{SECURITY_ENABLED_KEY}' holds '{value}', expected true or false"
                ))
            }),
        }
    }

    /// Persist the security intent.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LibSql` if the upsert fails.
    pub async fn set_security_enabled(&self, enabled: bool) -> Result<(), DatabaseError> {
        tracing::debug!(enabled, "persisting security intent");
        self.set_setting(SECURITY_ENABLED_KEY, if enabled { "true" } else { "false" })
            .await
    }
}

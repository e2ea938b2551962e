//! # vb-db
//!
//! libSQL persistence for Vaultbook.
//!
//! Holds every record kind (password entries and business records) in one
//! local database file, plus a `settings` table for the persisted security
//! intent. All per-kind CRUD goes through the generic [`store::RecordStore`],
//! driven by the schema constant each entity declares in `vb-core`.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod store;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Database handle: one libSQL database and its single connection.
///
/// Statements issued through the connection run in submission order.
pub struct VaultDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl VaultDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on every open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let vault_db = Self { db, conn };
        vault_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(vault_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}

//! Service layer over the database handle.
//!
//! `VaultService` owns the `VaultDb` and is the single entry point the front
//! end talks to. Record CRUD is reached through [`VaultService::records`];
//! settings, summaries, and sample data are added by the `repos` modules via
//! `impl VaultService` blocks.

use vb_core::schema::Entity;

use crate::VaultDb;
use crate::error::DatabaseError;
use crate::store::RecordStore;

pub struct VaultService {
    db: VaultDb,
}

impl VaultService {
    /// Open (or create) a local database and wrap it.
    ///
    /// # Arguments
    ///
    /// * `db_path`: path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = VaultDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Wrap an already-open database.
    #[must_use]
    pub const fn from_db(db: VaultDb) -> Self {
        Self { db }
    }

    #[must_use]
    pub const fn db(&self) -> &VaultDb {
        &self.db
    }

    /// CRUD store for one entity kind.
    #[must_use]
    pub const fn records<E: Entity>(&self) -> RecordStore<'_, E> {
        RecordStore::new(&self.db)
    }
}

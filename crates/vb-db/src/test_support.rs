//! Shared test utilities for vb-db unit tests.

pub(crate) mod helpers {
    use crate::VaultDb;
    use crate::service::VaultService;

    /// In-memory service with migrations applied.
    pub async fn test_service() -> VaultService {
        let db = VaultDb::open_local(":memory:").await.unwrap();
        VaultService::from_db(db)
    }
}

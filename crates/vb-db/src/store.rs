//! Generic record store.
//!
//! One implementation of list/get/insert/update/delete/count serves every
//! entity kind. Table and column identifiers come only from the entity's
//! `'static` schema constant; all values are bound as positional parameters.

use std::marker::PhantomData;

use serde_json::Value;
use tracing::debug;
use vb_core::schema::{Entity, Record};

use crate::VaultDb;
use crate::error::DatabaseError;
use crate::helpers::{entity_params, row_to_object};

/// CRUD over the table of entity kind `E`.
pub struct RecordStore<'a, E> {
    db: &'a VaultDb,
    _kind: PhantomData<fn() -> E>,
}

impl<'a, E: Entity> RecordStore<'a, E> {
    #[must_use]
    pub const fn new(db: &'a VaultDb) -> Self {
        Self {
            db,
            _kind: PhantomData,
        }
    }

    fn select_sql() -> String {
        format!(
            "SELECT id, {} FROM {}",
            E::SCHEMA.column_list(),
            E::SCHEMA.table
        )
    }

    fn decode(row: &libsql::Row) -> Result<Record<E>, DatabaseError> {
        let (id, object) = row_to_object(&E::SCHEMA, row)?;
        let fields = serde_json::from_value(Value::Object(object)).map_err(|e| {
            DatabaseError::InvalidState(format!("{} row {id} does not decode: {e}", E::KIND))
        })?;
        Ok(Record::new(id, fields))
    }

    fn encode(entity: &E) -> Result<Vec<libsql::Value>, DatabaseError> {
        let value = serde_json::to_value(entity)
            .map_err(|e| DatabaseError::InvalidState(format!("{} does not encode: {e}", E::KIND)))?;
        entity_params(&E::SCHEMA, &value)
    }

    /// All rows of this kind in the kind's list order. Empty when none.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be decoded.
    pub async fn list(&self) -> Result<Vec<Record<E>>, DatabaseError> {
        let sql = format!("{} ORDER BY {}", Self::select_sql(), E::SCHEMA.order_clause());
        debug!(kind = %E::KIND, "list");
        let mut rows = self.db.conn().query(&sql, ()).await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(Self::decode(&row)?);
        }
        Ok(results)
    }

    /// Fetch one row by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or the row cannot be decoded.
    pub async fn get(&self, id: i64) -> Result<Option<Record<E>>, DatabaseError> {
        let sql = format!("{} WHERE id = ?1", Self::select_sql());
        debug!(kind = %E::KIND, id, "get");
        let mut rows = self.db.conn().query(&sql, [id]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(Self::decode(&row)?)),
            None => Ok(None),
        }
    }

    /// Validate and insert; returns the store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` without touching the database when
    /// a field is rejected, or a storage error if the insert fails.
    pub async fn insert(&self, entity: &E) -> Result<i64, DatabaseError> {
        entity.validate()?;
        let params = Self::encode(entity)?;
        let placeholders = (1..=params.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders}) RETURNING id",
            E::SCHEMA.table,
            E::SCHEMA.column_list()
        );
        let mut rows = self
            .db
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let id = row.get::<i64>(0)?;
        debug!(kind = %E::KIND, id, "insert");
        Ok(id)
    }

    /// Validate and replace every field of the row with `id`.
    ///
    /// A nonexistent id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` without touching the database when
    /// a field is rejected, or a storage error if the update fails.
    pub async fn update(&self, id: i64, entity: &E) -> Result<(), DatabaseError> {
        entity.validate()?;
        let mut params = Self::encode(entity)?;
        let sets = E::SCHEMA
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{} = ?{}", column.name, i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let id_idx = params.len() + 1;
        params.push(id.into());
        let sql = format!("UPDATE {} SET {sets} WHERE id = ?{id_idx}", E::SCHEMA.table);
        let changed = self
            .db
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        debug!(kind = %E::KIND, id, changed, "update");
        Ok(())
    }

    /// Hard delete by id. A nonexistent id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", E::SCHEMA.table);
        let changed = self.db.conn().execute(&sql, [id]).await?;
        debug!(kind = %E::KIND, id, changed, "delete");
        Ok(())
    }

    /// Number of rows of this kind.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count(&self) -> Result<u64, DatabaseError> {
        let sql = format!("SELECT COUNT(*) FROM {}", E::SCHEMA.table);
        let mut rows = self.db.conn().query(&sql, ()).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let count = row.get::<i64>(0)?;
        u64::try_from(count).map_err(|_| DatabaseError::InvalidState(format!("negative count {count}")))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vb_core::entities::{PasswordEntry, Project};
    use vb_core::enums::ProjectStatus;
    use vb_core::errors::CoreError;

    use crate::error::DatabaseError;
    use crate::test_support::helpers::test_service;

    fn entry(destination: &str) -> PasswordEntry {
        PasswordEntry {
            destination: destination.into(),
            user: "alice".into(),
            password: "p@ss".into(),
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn list_empty_table() {
        let svc = test_service().await;
        let rows = svc.records::<PasswordEntry>().list().await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn ids_are_never_reused() {
        let svc = test_service().await;
        let store = svc.records::<PasswordEntry>();
        let first = store.insert(&entry("a.com")).await.unwrap();
        store.delete(first).await.unwrap();
        let second = store.insert(&entry("b.com")).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn validation_rejects_before_sql() {
        let svc = test_service().await;
        let store = svc.records::<PasswordEntry>();
        let err = store.insert(&entry("  ")).await.unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Validation(CoreError::Validation { ref field, .. }) if field == "destination"
        ));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_orders_destinations_case_insensitively() {
        let svc = test_service().await;
        let store = svc.records::<PasswordEntry>();
        for dest in ["zeta.io", "Alpha.com", "beta.org"] {
            store.insert(&entry(dest)).await.unwrap();
        }
        let order: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.fields.destination)
            .collect();
        assert_eq!(order, vec!["Alpha.com", "beta.org", "zeta.io"]);
    }

    #[tokio::test]
    async fn optional_columns_roundtrip_null() {
        let svc = test_service().await;
        let store = svc.records::<Project>();
        let project = Project {
            name: "Internal tooling".into(),
            client: "In-house".into(),
            start_date: "2024-01-10".into(),
            end_date: None,
            status: ProjectStatus::OnHold,
            budget: None,
            description: String::new(),
        };
        let id = store.insert(&project).await.unwrap();
        let fetched = store.get(id).await.unwrap().unwrap();
        assert_eq!(fetched.fields, project);
    }

    #[tokio::test]
    async fn get_missing_is_none() {
        let svc = test_service().await;
        assert!(svc.records::<Project>().get(42).await.unwrap().is_none());
    }
}

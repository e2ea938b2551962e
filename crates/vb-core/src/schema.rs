//! Schema descriptors that drive the generic record store.
//!
//! Each entity kind declares its table, ordered column list, and list
//! ordering once as an associated constant. The store binds parameters and
//! decodes rows by walking [`EntitySchema::columns`], converting through
//! `serde_json` so no per-kind SQL is written by hand.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::enums::EntityKind;
use crate::errors::CoreError;
use crate::validate::Validate;

/// SQL storage class of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// `TEXT NOT NULL`. A NULL read from disk decodes as `""`.
    Text,
    /// `REAL NOT NULL`.
    Real,
    /// Nullable `TEXT`.
    OptionalText,
    /// Nullable `REAL`.
    OptionalReal,
}

impl ColumnType {
    #[must_use]
    pub const fn is_optional(self) -> bool {
        matches!(self, Self::OptionalText | Self::OptionalReal)
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Real | Self::OptionalReal)
    }
}

/// One column: name on disk and in JSON, plus storage class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
}

impl Column {
    #[must_use]
    pub const fn new(name: &'static str, ty: ColumnType) -> Self {
        Self { name, ty }
    }

    /// Convert operator-supplied text into the JSON value this column expects.
    ///
    /// Empty input clears optional columns.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when a numeric column receives text
    /// that does not parse as a number.
    pub fn parse_input(&self, raw: &str) -> Result<Value, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() && self.ty.is_optional() {
            return Ok(Value::Null);
        }
        if !self.ty.is_numeric() {
            return Ok(Value::String(raw.to_string()));
        }
        let number: f64 = trimmed
            .parse()
            .map_err(|_| CoreError::validation(self.name, format!("'{raw}' is not a number")))?;
        serde_json::Number::from_f64(number)
            .map(Value::Number)
            .ok_or_else(|| CoreError::validation(self.name, "must be a finite number"))
    }
}

/// Table name, ordered columns (excluding `id`), and list ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySchema {
    pub table: &'static str,
    pub columns: &'static [Column],
    /// `ORDER BY` body without the trailing `id` tie-breaker.
    pub order_by: &'static str,
}

impl EntitySchema {
    /// Look up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Comma-separated column names, in declaration order.
    #[must_use]
    pub fn column_list(&self) -> String {
        self.columns
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Full ordering clause including the `id` tie-breaker.
    #[must_use]
    pub fn order_clause(&self) -> String {
        format!("{}, id ASC", self.order_by)
    }
}

/// A storable record kind.
pub trait Entity:
    Serialize + DeserializeOwned + Validate + Clone + Send + Sync + 'static
{
    const KIND: EntityKind;
    const SCHEMA: EntitySchema;

    /// Fill computed defaults into a partially supplied field map.
    fn apply_defaults(_fields: &mut Map<String, Value>) {}

    /// Build an entity from a field map, rejecting unknown fields and
    /// running validation.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownField` for a name the schema does not
    /// declare, or `CoreError::Validation` for missing or malformed fields.
    fn from_fields(mut fields: Map<String, Value>) -> Result<Self, CoreError> {
        if let Some(unknown) = fields.keys().find(|k| Self::SCHEMA.column(k).is_none()) {
            return Err(CoreError::UnknownField {
                kind: Self::KIND.to_string(),
                field: unknown.clone(),
                expected: Self::SCHEMA.column_list(),
            });
        }
        Self::apply_defaults(&mut fields);
        let entity: Self = serde_json::from_value(Value::Object(fields))
            .map_err(|e| CoreError::validation(Self::KIND.as_str(), e.to_string()))?;
        entity.validate()?;
        Ok(entity)
    }
}

/// A persisted entity together with its store-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<E> {
    pub id: i64,
    #[serde(flatten)]
    pub fields: E,
}

impl<E> Record<E> {
    pub const fn new(id: i64, fields: E) -> Self {
        Self { id, fields }
    }
}

//! Conversions between `serde_json` field maps and libSQL values.
//!
//! The record store never names entity fields in Rust. It serializes an
//! entity to a JSON object, walks the schema's column list to bind values,
//! and on read rebuilds the object column by column before deserializing.

use serde_json::{Map, Number, Value};
use vb_core::schema::{Column, ColumnType, EntitySchema};

use crate::error::DatabaseError;

/// Convert one JSON field into the libSQL value bound for `column`.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` when the JSON shape does not match
/// the column's storage class. That only happens when an entity struct and
/// its schema constant disagree.
pub fn to_sql_value(column: &Column, value: Option<&Value>) -> Result<libsql::Value, DatabaseError> {
    let mismatch = |found: &Value| {
        DatabaseError::InvalidState(format!(
            "column '{}' expects {:?}, entity produced {found}",
            column.name, column.ty
        ))
    };
    match (column.ty, value) {
        (ColumnType::OptionalText | ColumnType::OptionalReal, None | Some(Value::Null)) => {
            Ok(libsql::Value::Null)
        }
        (ColumnType::Text | ColumnType::OptionalText, Some(Value::String(s))) => {
            Ok(libsql::Value::Text(s.clone()))
        }
        (ColumnType::Real | ColumnType::OptionalReal, Some(Value::Number(n))) => n
            .as_f64()
            .map(libsql::Value::Real)
            .ok_or_else(|| mismatch(&Value::Number(n.clone()))),
        (_, Some(other)) => Err(mismatch(other)),
        (_, None) => Err(DatabaseError::InvalidState(format!(
            "entity is missing required column '{}'",
            column.name
        ))),
    }
}

/// Bind every schema column of a serialized entity, in declaration order.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the entity does not serialize to
/// an object or a column cannot be converted.
pub fn entity_params(
    schema: &EntitySchema,
    entity: &Value,
) -> Result<Vec<libsql::Value>, DatabaseError> {
    let object = entity.as_object().ok_or_else(|| {
        DatabaseError::InvalidState(format!("{} entity did not serialize to an object", schema.table))
    })?;
    schema
        .columns
        .iter()
        .map(|column| to_sql_value(column, object.get(column.name)))
        .collect()
}

/// Convert one libSQL value read from `column` back into JSON.
///
/// `NULL` in a required text column reads as `""`; integers in real columns
/// are widened.
///
/// # Errors
///
/// Returns `DatabaseError::Query` for values the column cannot hold.
pub fn from_sql_value(column: &Column, value: libsql::Value) -> Result<Value, DatabaseError> {
    match (column.ty, value) {
        (ColumnType::Text, libsql::Value::Null) => Ok(Value::String(String::new())),
        (ColumnType::OptionalText | ColumnType::OptionalReal, libsql::Value::Null) => Ok(Value::Null),
        (ColumnType::Text | ColumnType::OptionalText, libsql::Value::Text(s)) => Ok(Value::String(s)),
        (ColumnType::Real | ColumnType::OptionalReal, libsql::Value::Real(f)) => real_to_json(column, f),
        #[allow(clippy::cast_precision_loss)]
        (ColumnType::Real | ColumnType::OptionalReal, libsql::Value::Integer(i)) => {
            real_to_json(column, i as f64)
        }
        (_, other) => Err(DatabaseError::Query(format!(
            "column '{}' holds unexpected value {other:?}",
            column.name
        ))),
    }
}

fn real_to_json(column: &Column, f: f64) -> Result<Value, DatabaseError> {
    Number::from_f64(f)
        .map(Value::Number)
        .ok_or_else(|| DatabaseError::Query(format!("column '{}' holds non-finite {f}", column.name)))
}

/// Rebuild the JSON object for a row selected as `id, <schema columns>`.
///
/// # Errors
///
/// Returns `DatabaseError` if a column cannot be read or converted.
pub fn row_to_object(
    schema: &EntitySchema,
    row: &libsql::Row,
) -> Result<(i64, Map<String, Value>), DatabaseError> {
    let id = row.get::<i64>(0)?;
    let mut object = Map::with_capacity(schema.columns.len());
    for (offset, column) in schema.columns.iter().enumerate() {
        let idx = i32::try_from(offset + 1)
            .map_err(|_| DatabaseError::InvalidState(format!("{} has too many columns", schema.table)))?;
        let value = from_sql_value(column, row.get_value(idx)?)?;
        object.insert(column.name.to_string(), value);
    }
    Ok((id, object))
}

/// Read a REAL aggregate from column `idx`, treating NULL as zero.
///
/// # Errors
///
/// Returns `DatabaseError::Query` for non-numeric values.
pub fn get_total(row: &libsql::Row, idx: i32) -> Result<f64, DatabaseError> {
    match row.get_value(idx)? {
        libsql::Value::Null => Ok(0.0),
        libsql::Value::Real(f) => Ok(f),
        #[allow(clippy::cast_precision_loss)]
        libsql::Value::Integer(i) => Ok(i as f64),
        other => Err(DatabaseError::Query(format!("expected a number, got {other:?}"))),
    }
}

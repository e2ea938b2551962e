use anyhow::Context;
use serde_json::{Map, Value};
use vb_core::errors::CoreError;
use vb_core::schema::Entity;

/// Parse `FIELD=VALUE` arguments into a field map typed by `E`'s schema.
///
/// Splits on the first `=`, so values may contain `=`. A later assignment to
/// the same field wins.
pub fn parse_assignments<E: Entity>(pairs: &[String]) -> anyhow::Result<Map<String, Value>> {
    let mut fields = Map::new();
    for pair in pairs {
        let (name, raw) = pair
            .split_once('=')
            .with_context(|| format!("expected FIELD=VALUE, got '{pair}'"))?;
        let name = name.trim();
        let column = E::SCHEMA
            .column(name)
            .ok_or_else(|| CoreError::UnknownField {
                kind: E::KIND.to_string(),
                field: name.to_string(),
                expected: E::SCHEMA.column_list(),
            })?;
        fields.insert(name.to_string(), column.parse_input(raw)?);
    }
    Ok(fields)
}

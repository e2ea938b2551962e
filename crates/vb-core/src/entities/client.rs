use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;
use crate::errors::CoreError;
use crate::schema::{Column, ColumnType, Entity, EntitySchema};
use crate::validate::{Validate, require_date, require_text};

/// A customer. Contact fields are optional and stored as empty text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Client {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub joined_date: String,
}

impl Validate for Client {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("name", &self.name)?;
        if self.joined_date.is_empty() {
            return Ok(());
        }
        require_date("joined_date", &self.joined_date)
    }
}

impl Entity for Client {
    const KIND: EntityKind = EntityKind::Client;
    const SCHEMA: EntitySchema = EntitySchema {
        table: "clients",
        columns: &[
            Column::new("name", ColumnType::Text),
            Column::new("email", ColumnType::Text),
            Column::new("phone", ColumnType::Text),
            Column::new("company", ColumnType::Text),
            Column::new("address", ColumnType::Text),
            Column::new("joined_date", ColumnType::Text),
        ],
        order_by: "name COLLATE NOCASE ASC",
    };
}

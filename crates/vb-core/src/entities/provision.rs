use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;
use crate::errors::CoreError;
use crate::schema::{Column, ColumnType, Entity, EntitySchema};
use crate::validate::{Validate, positive_amount, require_date, require_text};

/// Money set aside for a known future obligation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Provision {
    pub title: String,
    pub amount: f64,
    pub date: String,
    /// Free text, typically `Active` or `Pending`.
    pub status: String,
}

impl Validate for Provision {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("title", &self.title)?;
        positive_amount("amount", self.amount)?;
        require_date("date", &self.date)?;
        require_text("status", &self.status)
    }
}

impl Entity for Provision {
    const KIND: EntityKind = EntityKind::Provision;
    const SCHEMA: EntitySchema = EntitySchema {
        table: "provisions",
        columns: &[
            Column::new("title", ColumnType::Text),
            Column::new("amount", ColumnType::Real),
            Column::new("date", ColumnType::Text),
            Column::new("status", ColumnType::Text),
        ],
        order_by: "date DESC",
    };
}

use serde::{Deserialize, Serialize};

use crate::enums::{AdvanceType, EntityKind};
use crate::errors::CoreError;
use crate::schema::{Column, ColumnType, Entity, EntitySchema};
use crate::validate::{Validate, positive_amount, require_date, require_text};

/// An advance payment, received from a client or paid to a vendor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Advance {
    pub title: String,
    pub amount: f64,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: AdvanceType,
}

impl Validate for Advance {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("title", &self.title)?;
        positive_amount("amount", self.amount)?;
        require_date("date", &self.date)
    }
}

impl Entity for Advance {
    const KIND: EntityKind = EntityKind::Advance;
    const SCHEMA: EntitySchema = EntitySchema {
        table: "advances",
        columns: &[
            Column::new("title", ColumnType::Text),
            Column::new("amount", ColumnType::Real),
            Column::new("date", ColumnType::Text),
            Column::new("type", ColumnType::Text),
        ],
        order_by: "date DESC",
    };
}

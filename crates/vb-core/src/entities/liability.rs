use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, LiabilityType};
use crate::errors::CoreError;
use crate::schema::{Column, ColumnType, Entity, EntitySchema};
use crate::validate::{Validate, positive_amount, require_date, require_text};

/// An amount owed, due on a given date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Liability {
    pub title: String,
    pub amount: f64,
    pub due_date: String,
    #[serde(rename = "type")]
    pub kind: LiabilityType,
}

impl Validate for Liability {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("title", &self.title)?;
        positive_amount("amount", self.amount)?;
        require_date("due_date", &self.due_date)
    }
}

impl Entity for Liability {
    const KIND: EntityKind = EntityKind::Liability;
    const SCHEMA: EntitySchema = EntitySchema {
        table: "liabilities",
        columns: &[
            Column::new("title", ColumnType::Text),
            Column::new("amount", ColumnType::Real),
            Column::new("due_date", ColumnType::Text),
            Column::new("type", ColumnType::Text),
        ],
        // Soonest obligation first.
        order_by: "due_date ASC",
    };
}

use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;
use crate::errors::CoreError;
use crate::schema::{Column, ColumnType, Entity, EntitySchema};
use crate::validate::{Validate, positive_amount, require_date, require_text};

/// Money spent in one category on one date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub category: String,
    pub amount: f64,
    pub date: String,
    #[serde(default)]
    pub description: String,
}

impl Validate for Expense {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("category", &self.category)?;
        positive_amount("amount", self.amount)?;
        require_date("date", &self.date)
    }
}

impl Entity for Expense {
    const KIND: EntityKind = EntityKind::Expense;
    const SCHEMA: EntitySchema = EntitySchema {
        table: "expenses",
        columns: &[
            Column::new("category", ColumnType::Text),
            Column::new("amount", ColumnType::Real),
            Column::new("date", ColumnType::Text),
            Column::new("description", ColumnType::Text),
        ],
        order_by: "date DESC",
    };
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::enums::EntityKind;
use crate::errors::CoreError;
use crate::schema::{Column, ColumnType, Entity, EntitySchema};
use crate::validate::{Validate, non_negative_amount, positive_amount, require_date, require_text};

/// Share of `amount` used as `gross_profit` when none is given.
pub const DEFAULT_PROFIT_RATIO: f64 = 0.7;

/// Income from one source on one date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Revenue {
    pub source: String,
    pub amount: f64,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// Counted toward total revenue in the financial summary.
    pub gross_profit: f64,
}

impl Revenue {
    /// Build a revenue whose gross profit defaults to 70% of the amount.
    pub fn with_default_profit(source: impl Into<String>, amount: f64, date: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            amount,
            date: date.into(),
            gross_profit: amount * DEFAULT_PROFIT_RATIO,
        }
    }
}

impl Validate for Revenue {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("source", &self.source)?;
        positive_amount("amount", self.amount)?;
        require_date("date", &self.date)?;
        non_negative_amount("gross_profit", self.gross_profit)
    }
}

impl Entity for Revenue {
    const KIND: EntityKind = EntityKind::Revenue;
    const SCHEMA: EntitySchema = EntitySchema {
        table: "revenues",
        columns: &[
            Column::new("source", ColumnType::Text),
            Column::new("amount", ColumnType::Real),
            Column::new("date", ColumnType::Text),
            Column::new("gross_profit", ColumnType::Real),
        ],
        order_by: "date DESC",
    };

    fn apply_defaults(fields: &mut Map<String, Value>) {
        let missing = fields.get("gross_profit").is_none_or(Value::is_null);
        if !missing {
            return;
        }
        let profit = fields
            .get("amount")
            .and_then(Value::as_f64)
            .and_then(|amount| serde_json::Number::from_f64(amount * DEFAULT_PROFIT_RATIO));
        if let Some(profit) = profit {
            fields.insert("gross_profit".to_string(), Value::Number(profit));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profit_is_seventy_percent() {
        let revenue = Revenue::with_default_profit("Consulting", 30000.0, "2023-10-20");
        assert!((revenue.gross_profit - 21000.0).abs() < 1e-6);
        assert!(revenue.validate().is_ok());
    }

    #[test]
    fn explicit_profit_is_kept() {
        let mut fields = Map::new();
        fields.insert("amount".into(), serde_json::json!(30000.0));
        fields.insert("gross_profit".into(), serde_json::json!(25000.0));
        Revenue::apply_defaults(&mut fields);
        assert_eq!(fields["gross_profit"], serde_json::json!(25000.0));
    }

    #[test]
    fn negative_profit_rejected() {
        let revenue = Revenue {
            source: "Consulting".into(),
            amount: 100.0,
            date: "2023-10-20".into(),
            gross_profit: -1.0,
        };
        assert!(matches!(
            revenue.validate(),
            Err(CoreError::Validation { ref field, .. }) if field == "gross_profit"
        ));
    }
}

use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, ProjectStatus};
use crate::errors::CoreError;
use crate::schema::{Column, ColumnType, Entity, EntitySchema};
use crate::validate::{Validate, non_negative_amount, optional_date, require_date, require_text};

/// A piece of client work. `client` is free text, not a foreign key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub name: String,
    pub client: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    pub status: ProjectStatus,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub description: String,
}

impl Validate for Project {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("name", &self.name)?;
        require_text("client", &self.client)?;
        require_date("start_date", &self.start_date)?;
        optional_date("end_date", self.end_date.as_deref())?;
        if let Some(budget) = self.budget {
            non_negative_amount("budget", budget)?;
        }
        Ok(())
    }
}

impl Entity for Project {
    const KIND: EntityKind = EntityKind::Project;
    const SCHEMA: EntitySchema = EntitySchema {
        table: "projects",
        columns: &[
            Column::new("name", ColumnType::Text),
            Column::new("client", ColumnType::Text),
            Column::new("start_date", ColumnType::Text),
            Column::new("end_date", ColumnType::OptionalText),
            Column::new("status", ColumnType::Text),
            Column::new("budget", ColumnType::OptionalReal),
            Column::new("description", ColumnType::Text),
        ],
        order_by: "start_date DESC",
    };
}

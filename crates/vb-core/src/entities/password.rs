use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;
use crate::errors::CoreError;
use crate::schema::{Column, ColumnType, Entity, EntitySchema};
use crate::validate::{Validate, require_text};

/// A stored credential in the password vault.
///
/// The password is kept in plain text at rest; access is gated by the
/// session guard, not by encryption.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordEntry {
    /// Site, host, or service the credential is for.
    pub destination: String,
    pub user: String,
    pub password: String,
    #[serde(default)]
    pub notes: String,
}

impl Validate for PasswordEntry {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("destination", &self.destination)?;
        require_text("user", &self.user)?;
        require_text("password", &self.password)
    }
}

impl Entity for PasswordEntry {
    const KIND: EntityKind = EntityKind::Password;
    const SCHEMA: EntitySchema = EntitySchema {
        table: "passwords",
        columns: &[
            Column::new("destination", ColumnType::Text),
            Column::new("user", ColumnType::Text),
            Column::new("password", ColumnType::Text),
            Column::new("notes", ColumnType::Text),
        ],
        order_by: "destination COLLATE NOCASE ASC",
    };
}

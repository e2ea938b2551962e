use clap::Subcommand;

/// CRUD actions shared by every record kind.
#[derive(Clone, Debug, Subcommand)]
pub enum RecordCommands {
    /// List all records in display order
    List,
    /// Show one record
    Get {
        /// Record ID
        id: i64,
    },
    /// Add a record from FIELD=VALUE pairs
    ///
    /// For passwords, `password=-` reads the value from a hidden prompt.
    Add {
        /// Field assignments, e.g. `destination=example.com`
        #[arg(required = true, value_name = "FIELD=VALUE")]
        fields: Vec<String>,
    },
    /// Change fields of an existing record
    Update {
        /// Record ID
        id: i64,

        /// Field assignments to apply
        #[arg(required = true, value_name = "FIELD=VALUE")]
        fields: Vec<String>,
    },
    /// Delete a record (no-op if it does not exist)
    Delete {
        /// Record ID
        id: i64,
    },
}

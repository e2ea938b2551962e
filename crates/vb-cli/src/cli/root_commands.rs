use clap::Subcommand;

use super::subcommands::{RecordCommands, SecurityCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Password vault entries
    Password {
        #[command(subcommand)]
        action: RecordCommands,
    },
    /// Revenue records
    Revenue {
        #[command(subcommand)]
        action: RecordCommands,
    },
    /// Expense records
    Expense {
        #[command(subcommand)]
        action: RecordCommands,
    },
    /// Provisions set aside
    Provision {
        #[command(subcommand)]
        action: RecordCommands,
    },
    /// Advances received or paid
    Advance {
        #[command(subcommand)]
        action: RecordCommands,
    },
    /// Short- and long-term liabilities
    Liability {
        #[command(subcommand)]
        action: RecordCommands,
    },
    /// Client directory
    Client {
        #[command(subcommand)]
        action: RecordCommands,
    },
    /// Projects
    Project {
        #[command(subcommand)]
        action: RecordCommands,
    },
    /// Revenue, expense, and net profit totals
    Summary,
    /// Financial summary plus client and project counts
    Dashboard,
    /// Insert sample business data into empty tables
    Seed,
    /// Session guard and passphrase management
    Security {
        #[command(subcommand)]
        action: SecurityCommands,
    },
}

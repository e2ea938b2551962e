//! Entity structs, one per record kind.
//!
//! Field names match the column names in the store, so each struct
//! serializes to exactly the column set its schema declares.

pub mod advance;
pub mod client;
pub mod expense;
pub mod liability;
pub mod password;
pub mod project;
pub mod provision;
pub mod revenue;

pub use advance::Advance;
pub use client::Client;
pub use expense::Expense;
pub use liability::Liability;
pub use password::PasswordEntry;
pub use project::Project;
pub use provision::Provision;
pub use revenue::Revenue;

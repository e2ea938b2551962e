//! Repository modules that add non-CRUD operations to `VaultService`.
//!
//! Each module extends `VaultService` via an `impl VaultService` block.

pub mod seed;
pub mod settings;
pub mod summary;

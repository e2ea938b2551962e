//! # vb-core
//!
//! Core types and validation for Vaultbook.
//!
//! This crate provides the foundational types shared across all Vaultbook crates:
//! - Entity structs for every record kind (password entries, revenues, clients, ...)
//! - The `Entity` trait and `EntitySchema` descriptors that drive the generic record store
//! - Enums for constrained text columns and the security policy
//! - Field validation applied before anything reaches the store
//! - Financial summary types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod schema;
pub mod summary;
pub mod validate;

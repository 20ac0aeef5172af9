//! Domain core for the vitrine carousel backend.
//!
//! This crate has zero internal deps so the ordering logic can be used by
//! the engine, the API layer, and any future CLI tooling, and unit-tested
//! without a database.

pub mod error;
pub mod ordering;
pub mod types;
pub mod validate;

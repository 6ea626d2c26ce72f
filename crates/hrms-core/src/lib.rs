//! Framework-agnostic domain types for the HRMS backend.
//!
//! This crate holds the identity-resolution and response-formatting contract that every
//! handler shares, the error taxonomy, and the records persisted through `hrms-ports`.

pub mod models;

pub use models::*;

//! Integration ports for the HRMS backend.
//!
//! Implement these traits to plug in a different key-value store or identity provider
//! without touching the handlers. Tests substitute fakes through the same seams.

pub mod identity;
pub mod ids;
pub mod storage;

pub use identity::*;
pub use ids::*;
pub use storage::*;

//! Item store selection for the HRMS backend.
//!
//! This crate centralizes URL-based backend selection (in-process vs SQLx) and wraps
//! the chosen implementation with `ObservedItemStore` for tracing.

use std::sync::Arc;

use hrms_core::StoreError;

pub use hrms_observability::ObservedItemStore;
pub use hrms_ports::{DynItemStore, ItemStore};

/// URL selecting the in-process store.
pub const MEMORY_URL: &str = "memory://";

pub mod memory {
    pub use hrms_storage_memory::InMemoryItemStore;
}

pub mod sqlx {
    pub use hrms_storage_sqlx::SqlxItemStore;
}

/// Name reported as `db_system` on storage spans.
pub fn db_system(database_url: &str) -> &'static str {
    if database_url.starts_with(MEMORY_URL) {
        "memory"
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://")
    {
        "postgresql"
    } else if database_url.starts_with("sqlite:") {
        "sqlite"
    } else {
        "sql"
    }
}

/// Create an item store based on URL scheme.
///
/// Supported:
/// - `memory://` -> in-process store (contents are lost on exit)
/// - `postgres://...` and `sqlite:...` -> SQLx backend
///
/// The store is returned uninitialized; callers run `init()` before serving.
pub async fn create_store(database_url: &str) -> Result<DynItemStore, StoreError> {
    let inner: DynItemStore = if database_url.starts_with(MEMORY_URL) {
        Arc::new(memory::InMemoryItemStore::new())
    } else {
        Arc::new(sqlx::SqlxItemStore::new(database_url).await?)
    };

    let observed = ObservedItemStore::new(inner, db_system(database_url));
    Ok(Arc::new(observed))
}

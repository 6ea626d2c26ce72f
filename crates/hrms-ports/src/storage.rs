use async_trait::async_trait;
use std::sync::Arc;

use hrms_core::{Item, ItemKey, StoreError, TableSchema};

/// Key-value store holding flat items addressed by partition and optional sort key.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Prepare the backing store (e.g. bootstrap schema).
    async fn init(&self) -> Result<(), StoreError>;

    /// Write `item`, replacing any item with the same primary key.
    async fn put_item(&self, table: &TableSchema, item: &Item) -> Result<(), StoreError>;

    async fn get_item(&self, table: &TableSchema, key: &ItemKey)
        -> Result<Option<Item>, StoreError>;

    /// All items sharing `partition`, in the order they were first written.
    async fn query_partition(
        &self,
        table: &TableSchema,
        partition: &str,
    ) -> Result<Vec<Item>, StoreError>;

    /// Lightweight readiness check.
    ///
    /// Implementations may override to do something cheaper than `init()`.
    async fn healthcheck(&self) -> Result<(), StoreError> {
        self.init().await
    }
}

pub type DynItemStore = Arc<dyn ItemStore>;

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use hrms_core::{Item, ItemKey, StoreError, TableSchema};
use hrms_ports::ItemStore;

/// Item store kept entirely in process memory.
///
/// Each table is an insertion-ordered list; overwriting an item keeps its original
/// position so partition queries stay in first-write order. Contents are lost on exit.
#[derive(Default)]
pub struct InMemoryItemStore {
    tables: RwLock<HashMap<String, Vec<(ItemKey, Item)>>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items currently held in `table`.
    pub async fn len(&self, table: &str) -> usize {
        self.tables.read().await.get(table).map_or(0, Vec::len)
    }

    pub async fn is_empty(&self, table: &str) -> bool {
        self.len(table).await == 0
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn init(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn put_item(&self, table: &TableSchema, item: &Item) -> Result<(), StoreError> {
        let key = table.key_of(item)?;
        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.name.clone()).or_default();

        match rows.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, stored)) => *stored = item.clone(),
            None => rows.push((key, item.clone())),
        }
        Ok(())
    }

    async fn get_item(
        &self,
        table: &TableSchema,
        key: &ItemKey,
    ) -> Result<Option<Item>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.get(&table.name).and_then(|rows| {
            rows.iter()
                .find(|(existing, _)| existing == key)
                .map(|(_, item)| item.clone())
        }))
    }

    async fn query_partition(
        &self,
        table: &TableSchema,
        partition: &str,
    ) -> Result<Vec<Item>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(&table.name)
            .map(|rows| {
                rows.iter()
                    .filter(|(key, _)| key.partition == partition)
                    .map(|(_, item)| item.clone())
                    .collect()
            })
            .unwrap_or_default())
    }
}

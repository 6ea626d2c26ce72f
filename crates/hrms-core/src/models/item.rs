use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::StoreError;

/// A single attribute value. Numbers are carried as their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    S(String),
    N(String),
}

impl AttributeValue {
    pub fn string(value: impl Into<String>) -> Self {
        Self::S(value.into())
    }

    pub fn number(value: i64) -> Self {
        Self::N(value.to_string())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::S(value) => Some(value),
            Self::N(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::N(value) => value.parse().ok(),
            Self::S(_) => None,
        }
    }
}

/// Flat attribute map as persisted by an item store.
pub type Item = BTreeMap<String, AttributeValue>;

/// Full primary key of an item within a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub partition: String,
    pub sort: Option<String>,
}

impl ItemKey {
    pub fn partition(partition: impl Into<String>) -> Self {
        Self {
            partition: partition.into(),
            sort: None,
        }
    }

    pub fn with_sort(partition: impl Into<String>, sort: impl Into<String>) -> Self {
        Self {
            partition: partition.into(),
            sort: Some(sort.into()),
        }
    }
}

/// Typed accessors used when turning an [`Item`] back into a record.
pub struct ItemReader<'a> {
    item: &'a Item,
}

impl<'a> ItemReader<'a> {
    pub fn new(item: &'a Item) -> Self {
        Self { item }
    }

    pub fn string(&self, name: &str) -> Result<String, StoreError> {
        match self.item.get(name) {
            Some(AttributeValue::S(value)) => Ok(value.clone()),
            Some(AttributeValue::N(_)) => Err(StoreError::decode(format!(
                "attribute `{name}` is a number, expected a string"
            ))),
            None => Err(StoreError::decode(format!("attribute `{name}` is missing"))),
        }
    }

    /// Absent attributes read as an empty string.
    pub fn string_or_empty(&self, name: &str) -> Result<String, StoreError> {
        if self.item.contains_key(name) {
            self.string(name)
        } else {
            Ok(String::new())
        }
    }

    pub fn integer(&self, name: &str) -> Result<i64, StoreError> {
        let value = self
            .item
            .get(name)
            .ok_or_else(|| StoreError::decode(format!("attribute `{name}` is missing")))?;
        value
            .as_i64()
            .ok_or_else(|| StoreError::decode(format!("attribute `{name}` is not an integer")))
    }
}

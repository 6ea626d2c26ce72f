use crate::{AttributeValue, Item, ItemKey, StoreError};

pub const DEFAULT_PROFILES_TABLE: &str = "HRMS_Profiles";
pub const DEFAULT_LEAVES_TABLE: &str = "HRMS_Leaves";
pub const DEFAULT_FEEDBACK_TABLE: &str = "HRMS_Feedback";
pub const DEFAULT_DOCUMENTS_TABLE: &str = "HRMS_Documents";

/// A table name together with the attributes forming its primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub partition_key: &'static str,
    pub sort_key: Option<&'static str>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, partition_key: &'static str) -> Self {
        Self {
            name: name.into(),
            partition_key,
            sort_key: None,
        }
    }

    pub fn with_sort_key(mut self, sort_key: &'static str) -> Self {
        self.sort_key = Some(sort_key);
        self
    }

    /// Extract the primary key of `item` according to this schema.
    pub fn key_of(&self, item: &Item) -> Result<ItemKey, StoreError> {
        let partition = key_attribute(item, self.partition_key)?;
        let sort = self
            .sort_key
            .map(|name| key_attribute(item, name))
            .transpose()?;
        Ok(ItemKey { partition, sort })
    }
}

fn key_attribute(item: &Item, name: &str) -> Result<String, StoreError> {
    match item.get(name) {
        Some(AttributeValue::S(value)) if !value.is_empty() => Ok(value.clone()),
        Some(_) => Err(StoreError::decode(format!(
            "key attribute `{name}` must be a non-empty string"
        ))),
        None => Err(StoreError::decode(format!("key attribute `{name}` is missing"))),
    }
}

/// The four tables the handlers work against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tables {
    pub profiles: TableSchema,
    pub leaves: TableSchema,
    pub feedback: TableSchema,
    pub documents: TableSchema,
}

impl Tables {
    pub fn new(
        profiles: impl Into<String>,
        leaves: impl Into<String>,
        feedback: impl Into<String>,
        documents: impl Into<String>,
    ) -> Self {
        Self {
            profiles: TableSchema::new(profiles, "userId"),
            leaves: TableSchema::new(leaves, "userId").with_sort_key("leaveId"),
            feedback: TableSchema::new(feedback, "userId").with_sort_key("feedbackId"),
            documents: TableSchema::new(documents, "userId").with_sort_key("documentId"),
        }
    }
}

impl Default for Tables {
    fn default() -> Self {
        Self::new(
            DEFAULT_PROFILES_TABLE,
            DEFAULT_LEAVES_TABLE,
            DEFAULT_FEEDBACK_TABLE,
            DEFAULT_DOCUMENTS_TABLE,
        )
    }
}

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::{AttributeValue, Item, ItemReader, StoreError};

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub user_id: String,
    pub feedback_id: String,
    pub feedback: String,
    pub timestamp: String,
}

impl FeedbackEntry {
    pub fn to_item(&self) -> Item {
        Item::from([
            ("userId".to_string(), AttributeValue::string(&self.user_id)),
            (
                "feedbackId".to_string(),
                AttributeValue::string(&self.feedback_id),
            ),
            ("feedback".to_string(), AttributeValue::string(&self.feedback)),
            (
                "timestamp".to_string(),
                AttributeValue::string(&self.timestamp),
            ),
        ])
    }

    pub fn from_item(item: &Item) -> Result<Self, StoreError> {
        let reader = ItemReader::new(item);
        Ok(Self {
            user_id: reader.string("userId")?,
            feedback_id: reader.string("feedbackId")?,
            feedback: reader.string("feedback")?,
            timestamp: reader.string_or_empty("timestamp")?,
        })
    }
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackSubmission {
    pub feedback: String,
    #[serde(default)]
    pub timestamp: String,
}

impl FeedbackSubmission {
    pub fn into_entry(self, user_id: impl Into<String>, feedback_id: impl Into<String>) -> FeedbackEntry {
        FeedbackEntry {
            user_id: user_id.into(),
            feedback_id: feedback_id.into(),
            feedback: self.feedback,
            timestamp: self.timestamp,
        }
    }
}

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::{AttributeValue, Item, ItemReader, StoreError};

pub const DEFAULT_LEAVE_STATUS: &str = "Pending";

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub user_id: String,
    pub leave_id: String,
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
    pub status: String,
    pub submitted_at: String,
}

impl LeaveRequest {
    pub fn to_item(&self) -> Item {
        Item::from([
            ("userId".to_string(), AttributeValue::string(&self.user_id)),
            ("leaveId".to_string(), AttributeValue::string(&self.leave_id)),
            (
                "leaveType".to_string(),
                AttributeValue::string(&self.leave_type),
            ),
            (
                "startDate".to_string(),
                AttributeValue::string(&self.start_date),
            ),
            ("endDate".to_string(), AttributeValue::string(&self.end_date)),
            ("reason".to_string(), AttributeValue::string(&self.reason)),
            ("status".to_string(), AttributeValue::string(&self.status)),
            (
                "submittedAt".to_string(),
                AttributeValue::string(&self.submitted_at),
            ),
        ])
    }

    pub fn from_item(item: &Item) -> Result<Self, StoreError> {
        let reader = ItemReader::new(item);
        Ok(Self {
            user_id: reader.string("userId")?,
            leave_id: reader.string("leaveId")?,
            leave_type: reader.string("leaveType")?,
            start_date: reader.string("startDate")?,
            end_date: reader.string("endDate")?,
            reason: reader.string_or_empty("reason")?,
            status: reader.string_or_empty("status")?,
            submitted_at: reader.string_or_empty("submittedAt")?,
        })
    }
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveSubmission {
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub submitted_at: String,
}

fn default_status() -> String {
    DEFAULT_LEAVE_STATUS.to_string()
}

impl LeaveSubmission {
    pub fn into_request(self, user_id: impl Into<String>, leave_id: impl Into<String>) -> LeaveRequest {
        LeaveRequest {
            user_id: user_id.into(),
            leave_id: leave_id.into(),
            leave_type: self.leave_type,
            start_date: self.start_date,
            end_date: self.end_date,
            reason: self.reason,
            status: self.status,
            submitted_at: self.submitted_at,
        }
    }
}

use serde::Serialize;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::{DocumentMetadata, FeedbackEntry, LeaveRequest, Profile};

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub id_token: String,
    pub access_token: String,
    pub user_id: String,
}

/// Serializes as `{}`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EmptyObject {}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ProfileBody {
    Found(Profile),
    Empty(EmptyObject),
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub profile: ProfileBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ProfileResponse {
    pub fn found(profile: Profile) -> Self {
        Self {
            profile: ProfileBody::Found(profile),
            message: None,
        }
    }

    pub fn not_found() -> Self {
        Self {
            profile: ProfileBody::Empty(EmptyObject {}),
            message: Some("Profile not found.".to_string()),
        }
    }
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveSubmitted {
    pub message: String,
    pub leave_id: String,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Serialize)]
pub struct LeaveList {
    pub leaves: Vec<LeaveRequest>,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSubmitted {
    pub message: String,
    pub feedback_id: String,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackList {
    pub feedback: Vec<FeedbackEntry>,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSaved {
    pub message: String,
    pub document_id: String,
    pub s3_key: String,
}

#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[derive(Debug, Clone, Serialize)]
pub struct DocumentList {
    pub documents: Vec<DocumentMetadata>,
}

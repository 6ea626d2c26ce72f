use std::fmt::Display;

use thiserror::Error;

use crate::ResponseEnvelope;

/// Every failure a handler can report.
///
/// The display text of each variant is the exact `message` sent to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HrmsError {
    #[error("Unauthorized: User ID missing.")]
    MissingIdentity,

    #[error("{0}")]
    Validation(String),

    #[error("Email already registered.")]
    EmailAlreadyRegistered,

    #[error("Password does not meet requirements.")]
    InvalidPassword,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("User not found.")]
    UnknownLoginUser,

    #[error("User not found. Please sign up again.")]
    UnknownSignUpUser,

    #[error("Invalid verification code. Please try again.")]
    CodeMismatch,

    #[error("Verification code expired. Please request a new one.")]
    CodeExpired,

    #[error("User is already confirmed or not authorized.")]
    AlreadyConfirmed,

    #[error("Attempt limit exceeded, please try again later.")]
    LimitExceeded,

    /// The request body was absent or could not be read into the expected shape.
    #[error("Internal server error: {0}")]
    MalformedPayload(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl HrmsError {
    pub fn internal(detail: impl Display) -> Self {
        Self::Internal(detail.to_string())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Stable tag, suitable for logs and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingIdentity => "missing_identity",
            Self::Validation(_) => "validation",
            Self::EmailAlreadyRegistered => "email_already_registered",
            Self::InvalidPassword => "invalid_password",
            Self::InvalidCredentials => "invalid_credentials",
            Self::UnknownLoginUser | Self::UnknownSignUpUser => "user_not_found",
            Self::CodeMismatch => "code_mismatch",
            Self::CodeExpired => "code_expired",
            Self::AlreadyConfirmed => "already_confirmed",
            Self::LimitExceeded => "limit_exceeded",
            Self::MalformedPayload(_) => "malformed_payload",
            Self::Internal(_) => "internal",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingIdentity | Self::InvalidCredentials | Self::UnknownLoginUser => 401,
            Self::Validation(_)
            | Self::EmailAlreadyRegistered
            | Self::InvalidPassword
            | Self::UnknownSignUpUser
            | Self::CodeMismatch
            | Self::CodeExpired
            | Self::AlreadyConfirmed
            | Self::LimitExceeded => 400,
            Self::MalformedPayload(_) | Self::Internal(_) => 500,
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    pub fn to_response(&self) -> ResponseEnvelope {
        ResponseEnvelope::message(self.status_code(), &self.to_string())
    }
}

/// Failures reported by an item store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{0}")]
    Backend(String),

    #[error("malformed item: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn backend(detail: impl Display) -> Self {
        Self::Backend(detail.to_string())
    }

    pub fn decode(detail: impl Display) -> Self {
        Self::Decode(detail.to_string())
    }
}

impl From<StoreError> for HrmsError {
    fn from(err: StoreError) -> Self {
        Self::internal(err)
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Outcome categories reported by the identity provider.
///
/// Which [`HrmsError`] a category becomes depends on the operation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("username already exists")]
    UsernameExists,

    #[error("password does not satisfy the policy")]
    InvalidPassword,

    #[error("not authorized")]
    NotAuthorized,

    #[error("user not found")]
    UserNotFound,

    #[error("verification code mismatch")]
    CodeMismatch,

    #[error("verification code expired")]
    ExpiredCode,

    #[error("attempt limit exceeded")]
    LimitExceeded,

    #[error("{0}")]
    Service(String),
}

impl IdentityError {
    pub fn service(detail: impl Display) -> Self {
        Self::Service(detail.to_string())
    }
}

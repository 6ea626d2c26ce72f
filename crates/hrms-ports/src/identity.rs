use async_trait::async_trait;
use std::sync::Arc;

use hrms_core::{AuthTokens, IdentityError};

/// External service owning user credentials and the sign-up confirmation flow.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), IdentityError>;

    async fn authenticate(&self, email: &str, password: &str)
        -> Result<AuthTokens, IdentityError>;

    async fn confirm_sign_up(&self, email: &str, code: &str) -> Result<(), IdentityError>;

    async fn resend_confirmation_code(&self, email: &str) -> Result<(), IdentityError>;
}

pub type DynIdentityProvider = Arc<dyn IdentityProvider>;

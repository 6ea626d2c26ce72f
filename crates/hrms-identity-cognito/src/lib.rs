//! Identity provider backed by a Cognito user pool.
//!
//! Talks to the Cognito Identity Provider JSON API directly (`X-Amz-Target` dispatch).
//! The operations used here are public client operations and need no request signing.

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use reqwest::Client;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use hrms_core::{AuthTokens, IdentityError};
use hrms_ports::IdentityProvider;

const TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// Regional Cognito Identity Provider endpoint.
pub fn regional_endpoint(region: &str) -> String {
    format!("https://cognito-idp.{region}.amazonaws.com/")
}

pub struct CognitoIdentityProvider {
    client: Client,
    endpoint: String,
    client_id: String,
}

impl CognitoIdentityProvider {
    pub fn new(region: &str, client_id: impl Into<String>) -> Result<Self, IdentityError> {
        Self::with_endpoint(regional_endpoint(region), client_id)
    }

    /// Point the adapter at an explicit endpoint (emulators, tests).
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Result<Self, IdentityError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(3))
            .build()
            .map_err(IdentityError::service)?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            client_id: client_id.into(),
        })
    }

    async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        action: &str,
        payload: &P,
    ) -> Result<R, IdentityError> {
        let body = serde_json::to_vec(payload).map_err(IdentityError::service)?;
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .header("X-Amz-Target", format!("{TARGET_PREFIX}.{action}"))
            .body(body)
            .send()
            .await
            .map_err(IdentityError::service)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(IdentityError::service)?;

        if !status.is_success() {
            let err = error_from_body(&bytes);
            tracing::debug!(action, status = status.as_u16(), error = %err, "cognito call failed");
            return Err(err);
        }

        let bytes: &[u8] = if bytes.is_empty() { b"{}" } else { &bytes };
        serde_json::from_slice(bytes).map_err(|err| {
            IdentityError::service(format!("unexpected {action} response: {err}"))
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AttributeType<'a> {
    name: &'a str,
    value: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SignUpRequest<'a> {
    client_id: &'a str,
    username: &'a str,
    password: &'a str,
    user_attributes: [AttributeType<'a>; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthRequest<'a> {
    client_id: &'a str,
    auth_flow: &'static str,
    auth_parameters: AuthParameters<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct AuthParameters<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthResponse {
    authentication_result: Option<AuthenticationResult>,
    challenge_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationResult {
    id_token: String,
    access_token: String,
    refresh_token: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ConfirmSignUpRequest<'a> {
    client_id: &'a str,
    username: &'a str,
    confirmation_code: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ResendCodeRequest<'a> {
    client_id: &'a str,
    username: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "__type", default)]
    error_type: String,
    #[serde(alias = "Message", default)]
    message: String,
}

/// Map an error response body onto an [`IdentityError`] category.
///
/// `__type` may be namespaced (`com.amazonaws...#UserNotFoundException`); only the part
/// after `#` is significant.
fn error_from_body(body: &[u8]) -> IdentityError {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(error) => classify(&error.error_type, &error.message),
        Err(_) => IdentityError::service(String::from_utf8_lossy(body)),
    }
}

fn classify(error_type: &str, message: &str) -> IdentityError {
    let name = error_type.rsplit('#').next().unwrap_or(error_type);
    match name {
        "UsernameExistsException" => IdentityError::UsernameExists,
        "InvalidPasswordException" => IdentityError::InvalidPassword,
        "NotAuthorizedException" => IdentityError::NotAuthorized,
        "UserNotFoundException" => IdentityError::UserNotFound,
        "CodeMismatchException" => IdentityError::CodeMismatch,
        "ExpiredCodeException" => IdentityError::ExpiredCode,
        "LimitExceededException" => IdentityError::LimitExceeded,
        _ if message.is_empty() => IdentityError::service(name),
        _ => IdentityError::service(format!("{name}: {message}")),
    }
}

/// Read the `sub` claim from a JWT payload without verifying it.
///
/// The token was just issued by the provider over TLS; it is only decoded here to
/// report the caller's subject.
pub fn subject_from_id_token(id_token: &str) -> Option<String> {
    let payload = id_token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;
    claims
        .get("sub")
        .and_then(Value::as_str)
        .filter(|sub| !sub.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl IdentityProvider for CognitoIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), IdentityError> {
        let request = SignUpRequest {
            client_id: &self.client_id,
            username: email,
            password,
            user_attributes: [AttributeType {
                name: "email",
                value: email,
            }],
        };
        let _: IgnoredAny = self.call("SignUp", &request).await?;
        Ok(())
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthTokens, IdentityError> {
        let request = InitiateAuthRequest {
            client_id: &self.client_id,
            auth_flow: "USER_PASSWORD_AUTH",
            auth_parameters: AuthParameters {
                username: email,
                password,
            },
        };
        let response: InitiateAuthResponse = self.call("InitiateAuth", &request).await?;

        let Some(result) = response.authentication_result else {
            let challenge = response.challenge_name.unwrap_or_else(|| "none".to_string());
            return Err(IdentityError::service(format!(
                "'AuthenticationResult' missing (challenge: {challenge})"
            )));
        };

        let subject = subject_from_id_token(&result.id_token);
        Ok(AuthTokens {
            id_token: result.id_token,
            access_token: result.access_token,
            refresh_token: result.refresh_token,
            subject,
        })
    }

    async fn confirm_sign_up(&self, email: &str, code: &str) -> Result<(), IdentityError> {
        let request = ConfirmSignUpRequest {
            client_id: &self.client_id,
            username: email,
            confirmation_code: code,
        };
        let _: IgnoredAny = self.call("ConfirmSignUp", &request).await?;
        Ok(())
    }

    async fn resend_confirmation_code(&self, email: &str) -> Result<(), IdentityError> {
        let request = ResendCodeRequest {
            client_id: &self.client_id,
            username: email,
        };
        let _: IgnoredAny = self.call("ResendConfirmationCode", &request).await?;
        Ok(())
    }
}

//! Account lifecycle handlers backed by the identity provider.
//!
//! These handlers do not resolve an identity; the caller is identified by email.
//! Provider failures are mapped per operation, so the same category can surface with a
//! different status or message depending on where it happened.

use hrms_core::{
    CodeResend, Confirmation, Credentials, HrmsError, IdentityError, LoginResponse,
    MessageResponse, RequestEvent, ResponseEnvelope,
};

use crate::support::{parse_body, respond};
use crate::HandlerContext;

#[tracing::instrument(name = "register_user", skip_all)]
pub async fn register_user(ctx: &HandlerContext, event: &RequestEvent) -> ResponseEnvelope {
    respond("register_user", None, register(ctx, event).await)
}

#[tracing::instrument(name = "login_user", skip_all)]
pub async fn login_user(ctx: &HandlerContext, event: &RequestEvent) -> ResponseEnvelope {
    respond("login_user", None, login(ctx, event).await)
}

#[tracing::instrument(name = "confirm_signup", skip_all)]
pub async fn confirm_signup(ctx: &HandlerContext, event: &RequestEvent) -> ResponseEnvelope {
    respond("confirm_signup", None, confirm(ctx, event).await)
}

#[tracing::instrument(name = "resend_code", skip_all)]
pub async fn resend_code(ctx: &HandlerContext, event: &RequestEvent) -> ResponseEnvelope {
    respond("resend_code", None, resend(ctx, event).await)
}

async fn register(ctx: &HandlerContext, event: &RequestEvent) -> Result<MessageResponse, HrmsError> {
    let credentials: Credentials = parse_body(event)?;
    ctx.identity
        .sign_up(&credentials.email, &credentials.password)
        .await
        .map_err(sign_up_error)?;

    tracing::info!("user registered");
    Ok(MessageResponse::new(
        "User registered successfully. Please confirm your account.",
    ))
}

async fn login(ctx: &HandlerContext, event: &RequestEvent) -> Result<LoginResponse, HrmsError> {
    let credentials: Credentials = parse_body(event)?;
    let tokens = ctx
        .identity
        .authenticate(&credentials.email, &credentials.password)
        .await
        .map_err(login_error)?;

    Ok(LoginResponse {
        message: "Login successful!".to_string(),
        id_token: tokens.id_token,
        access_token: tokens.access_token,
        user_id: tokens.subject.unwrap_or(credentials.email),
    })
}

async fn confirm(ctx: &HandlerContext, event: &RequestEvent) -> Result<MessageResponse, HrmsError> {
    let confirmation: Confirmation = parse_body(event)?;
    ctx.identity
        .confirm_sign_up(&confirmation.email, &confirmation.code)
        .await
        .map_err(confirm_error)?;

    Ok(MessageResponse::new("Account confirmed successfully!"))
}

async fn resend(ctx: &HandlerContext, event: &RequestEvent) -> Result<MessageResponse, HrmsError> {
    let request: CodeResend = parse_body(event)?;
    ctx.identity
        .resend_confirmation_code(&request.email)
        .await
        .map_err(resend_error)?;

    Ok(MessageResponse::new("Verification code resent successfully!"))
}

fn sign_up_error(err: IdentityError) -> HrmsError {
    match err {
        IdentityError::UsernameExists => HrmsError::EmailAlreadyRegistered,
        IdentityError::InvalidPassword => HrmsError::InvalidPassword,
        other => HrmsError::internal(other),
    }
}

fn login_error(err: IdentityError) -> HrmsError {
    match err {
        IdentityError::NotAuthorized => HrmsError::InvalidCredentials,
        IdentityError::UserNotFound => HrmsError::UnknownLoginUser,
        other => HrmsError::internal(other),
    }
}

fn confirm_error(err: IdentityError) -> HrmsError {
    match err {
        IdentityError::UserNotFound => HrmsError::UnknownSignUpUser,
        IdentityError::CodeMismatch => HrmsError::CodeMismatch,
        IdentityError::ExpiredCode => HrmsError::CodeExpired,
        IdentityError::NotAuthorized => HrmsError::AlreadyConfirmed,
        other => HrmsError::internal(other),
    }
}

fn resend_error(err: IdentityError) -> HrmsError {
    match err {
        IdentityError::UserNotFound => HrmsError::UnknownSignUpUser,
        IdentityError::LimitExceeded => HrmsError::LimitExceeded,
        other => HrmsError::internal(other),
    }
}

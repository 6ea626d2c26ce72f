use validator::Validate;

use hrms_core::{
    resolve_identity, HrmsError, ItemKey, MessageResponse, Profile, ProfileResponse,
    ProfileUpdate, RequestEvent, ResponseEnvelope,
};

use crate::support::{parse_body, respond};
use crate::HandlerContext;

/// Return the caller's profile, or an empty profile with a "not found" message.
#[tracing::instrument(name = "get_profile", skip_all)]
pub async fn get_profile(ctx: &HandlerContext, event: &RequestEvent) -> ResponseEnvelope {
    let Some(user_id) = resolve_identity(event) else {
        return HrmsError::MissingIdentity.to_response();
    };
    respond("get_profile", Some(&user_id), fetch(ctx, &user_id).await)
}

/// Create or fully replace the caller's profile.
#[tracing::instrument(name = "update_profile", skip_all)]
pub async fn update_profile(ctx: &HandlerContext, event: &RequestEvent) -> ResponseEnvelope {
    let Some(user_id) = resolve_identity(event) else {
        return HrmsError::MissingIdentity.to_response();
    };
    respond("update_profile", Some(&user_id), update(ctx, &user_id, event).await)
}

async fn fetch(ctx: &HandlerContext, user_id: &str) -> Result<ProfileResponse, HrmsError> {
    let item = ctx
        .store
        .get_item(&ctx.tables.profiles, &ItemKey::partition(user_id))
        .await?;

    match item {
        Some(item) => Ok(ProfileResponse::found(Profile::from_item(&item)?)),
        None => Ok(ProfileResponse::not_found()),
    }
}

async fn update(
    ctx: &HandlerContext,
    user_id: &str,
    event: &RequestEvent,
) -> Result<MessageResponse, HrmsError> {
    let update: ProfileUpdate = parse_body(event)?;
    if let Err(errors) = update.validate() {
        tracing::debug!(%errors, "profile update rejected");
        return Err(HrmsError::validation("Missing required profile fields."));
    }

    let profile = update.into_profile(user_id);
    ctx.store.put_item(&ctx.tables.profiles, &profile.to_item()).await?;

    tracing::info!(user_id, "profile updated");
    Ok(MessageResponse::new("Profile updated successfully."))
}

use hrms_core::{
    resolve_identity, HrmsError, LeaveList, LeaveRequest, LeaveSubmission, LeaveSubmitted,
    RequestEvent, ResponseEnvelope, StoreError,
};

use crate::support::{parse_body, respond};
use crate::HandlerContext;

#[tracing::instrument(name = "submit_leave", skip_all)]
pub async fn submit_leave(ctx: &HandlerContext, event: &RequestEvent) -> ResponseEnvelope {
    let Some(user_id) = resolve_identity(event) else {
        return HrmsError::MissingIdentity.to_response();
    };
    respond("submit_leave", Some(&user_id), submit(ctx, &user_id, event).await)
}

#[tracing::instrument(name = "get_leaves", skip_all)]
pub async fn get_leaves(ctx: &HandlerContext, event: &RequestEvent) -> ResponseEnvelope {
    let Some(user_id) = resolve_identity(event) else {
        return HrmsError::MissingIdentity.to_response();
    };
    respond("get_leaves", Some(&user_id), list(ctx, &user_id).await)
}

async fn submit(
    ctx: &HandlerContext,
    user_id: &str,
    event: &RequestEvent,
) -> Result<LeaveSubmitted, HrmsError> {
    let submission: LeaveSubmission = parse_body(event)?;
    let leave_id = ctx.ids.generate();
    let request = submission.into_request(user_id, leave_id.clone());

    ctx.store.put_item(&ctx.tables.leaves, &request.to_item()).await?;

    tracing::info!(user_id, leave_id = %leave_id, "leave request stored");
    Ok(LeaveSubmitted {
        message: "Leave request submitted successfully!".to_string(),
        leave_id,
    })
}

async fn list(ctx: &HandlerContext, user_id: &str) -> Result<LeaveList, HrmsError> {
    let items = ctx.store.query_partition(&ctx.tables.leaves, user_id).await?;
    let leaves = items
        .iter()
        .map(LeaveRequest::from_item)
        .collect::<Result<Vec<_>, StoreError>>()?;
    Ok(LeaveList { leaves })
}

use hrms_core::{
    resolve_identity, FeedbackEntry, FeedbackList, FeedbackSubmission, FeedbackSubmitted,
    HrmsError, RequestEvent, ResponseEnvelope, StoreError,
};

use crate::support::{parse_body, respond};
use crate::HandlerContext;

#[tracing::instrument(name = "submit_feedback", skip_all)]
pub async fn submit_feedback(ctx: &HandlerContext, event: &RequestEvent) -> ResponseEnvelope {
    let Some(user_id) = resolve_identity(event) else {
        return HrmsError::MissingIdentity.to_response();
    };
    respond("submit_feedback", Some(&user_id), submit(ctx, &user_id, event).await)
}

#[tracing::instrument(name = "get_feedback", skip_all)]
pub async fn get_feedback(ctx: &HandlerContext, event: &RequestEvent) -> ResponseEnvelope {
    let Some(user_id) = resolve_identity(event) else {
        return HrmsError::MissingIdentity.to_response();
    };
    respond("get_feedback", Some(&user_id), list(ctx, &user_id).await)
}

async fn submit(
    ctx: &HandlerContext,
    user_id: &str,
    event: &RequestEvent,
) -> Result<FeedbackSubmitted, HrmsError> {
    let submission: FeedbackSubmission = parse_body(event)?;
    let feedback_id = ctx.ids.generate();
    let entry = submission.into_entry(user_id, feedback_id.clone());

    ctx.store.put_item(&ctx.tables.feedback, &entry.to_item()).await?;

    tracing::info!(user_id, feedback_id = %feedback_id, "feedback stored");
    Ok(FeedbackSubmitted {
        message: "Feedback submitted successfully!".to_string(),
        feedback_id,
    })
}

async fn list(ctx: &HandlerContext, user_id: &str) -> Result<FeedbackList, HrmsError> {
    let items = ctx
        .store
        .query_partition(&ctx.tables.feedback, user_id)
        .await?;
    let feedback = items
        .iter()
        .map(FeedbackEntry::from_item)
        .collect::<Result<Vec<_>, StoreError>>()?;
    Ok(FeedbackList { feedback })
}

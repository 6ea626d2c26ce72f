//! Document metadata handlers.
//!
//! Uploading records where a document lives in the bucket and how to download it; the
//! file bytes themselves never pass through this service.

use hrms_core::{
    resolve_identity, DocumentList, DocumentMetadata, DocumentSaved, DocumentUpload, HrmsError,
    RequestEvent, ResponseEnvelope, StoreError,
};

use crate::support::{parse_body, respond};
use crate::HandlerContext;

#[tracing::instrument(name = "upload_document", skip_all)]
pub async fn upload_document(ctx: &HandlerContext, event: &RequestEvent) -> ResponseEnvelope {
    let Some(user_id) = resolve_identity(event) else {
        return HrmsError::MissingIdentity.to_response();
    };
    respond("upload_document", Some(&user_id), upload(ctx, &user_id, event).await)
}

#[tracing::instrument(name = "get_documents", skip_all)]
pub async fn get_documents(ctx: &HandlerContext, event: &RequestEvent) -> ResponseEnvelope {
    let Some(user_id) = resolve_identity(event) else {
        return HrmsError::MissingIdentity.to_response();
    };
    respond("get_documents", Some(&user_id), list(ctx, &user_id).await)
}

async fn upload(
    ctx: &HandlerContext,
    user_id: &str,
    event: &RequestEvent,
) -> Result<DocumentSaved, HrmsError> {
    let upload: DocumentUpload = parse_body(event)?;
    let blob = ctx
        .documents
        .reference(user_id, &ctx.ids.generate(), &upload.file_name);
    let document_id = ctx.ids.generate();
    let metadata = upload.into_metadata(user_id, document_id.clone(), blob);

    ctx.store
        .put_item(&ctx.tables.documents, &metadata.to_item())
        .await?;

    tracing::info!(user_id, document_id = %document_id, s3_key = %metadata.s3_key, "document metadata stored");
    Ok(DocumentSaved {
        message: "Document metadata saved successfully!".to_string(),
        document_id,
        s3_key: metadata.s3_key,
    })
}

async fn list(ctx: &HandlerContext, user_id: &str) -> Result<DocumentList, HrmsError> {
    let items = ctx
        .store
        .query_partition(&ctx.tables.documents, user_id)
        .await?;
    let documents = items
        .iter()
        .map(DocumentMetadata::from_item)
        .collect::<Result<Vec<_>, StoreError>>()?;
    Ok(DocumentList { documents })
}

use utoipa::OpenApi;

/// OpenAPI document generator.
///
/// Kept in its own crate so it can be reused by:
/// - the server binary (Swagger UI + `/api-docs/openapi.json`)
/// - tooling binaries (exporting a static spec)
#[derive(OpenApi)]
#[openapi(
    components(
        schemas(
            hrms_core::Credentials,
            hrms_core::Confirmation,
            hrms_core::CodeResend,
            hrms_core::LoginResponse,
            hrms_core::MessageResponse,
            hrms_core::Profile,
            hrms_core::ProfileUpdate,
            hrms_core::LeaveRequest,
            hrms_core::LeaveSubmission,
            hrms_core::LeaveSubmitted,
            hrms_core::LeaveList,
            hrms_core::DocumentMetadata,
            hrms_core::DocumentUpload,
            hrms_core::DocumentSaved,
            hrms_core::DocumentList,
            hrms_core::FeedbackEntry,
            hrms_core::FeedbackSubmission,
            hrms_core::FeedbackSubmitted,
            hrms_core::FeedbackList,
        )
    ),
    tags(
        (name = "Auth", description = "Sign-up, confirmation and login against the identity provider"),
        (name = "Profile", description = "Employee profile read and replace"),
        (name = "Leaves", description = "Leave requests"),
        (name = "Documents", description = "Document metadata and download locations"),
        (name = "Feedback", description = "Employee feedback"),
        (name = "Observability", description = "Health checks and metrics"),
    ),
    info(
        title = "HRMS API",
        version = "0.1.0",
        description = "Employee self-service backend: profiles, leave requests, documents and feedback",
        license(
            name = "MIT OR Apache-2.0"
        )
    )
)]
pub struct ApiDoc;

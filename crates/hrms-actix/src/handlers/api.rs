//! HTTP entry points for the envelope handlers.
//!
//! Each wrapper verifies the bearer token (when an authorizer is configured), builds the
//! request event, runs the handler and writes its envelope back unchanged.

use actix_web::{web, HttpRequest, HttpResponse};

use hrms_core::RequestEvent;
use hrms_handlers::{auth, document, feedback, leave, profile, HandlerContext};
use hrms_observability::Metrics;

use crate::authorizer::BearerAuthorizer;
use crate::event::request_event;

fn build_event(
    req: &HttpRequest,
    body: &[u8],
    authorizer: Option<&BearerAuthorizer>,
) -> Result<RequestEvent, HttpResponse> {
    let claims = match authorizer {
        Some(authorizer) => authorizer
            .claims(req)
            .map_err(|rejected| HttpResponse::from(rejected.to_response()))?,
        None => None,
    };
    Ok(request_event(req, body, claims))
}

macro_rules! envelope_route {
    ($(#[$doc:meta])* $name:ident => $handler:path) => {
        $(#[$doc])*
        pub async fn $name(
            req: HttpRequest,
            body: web::Bytes,
            ctx: web::Data<HandlerContext>,
            metrics: web::Data<Metrics>,
            authorizer: Option<web::Data<BearerAuthorizer>>,
        ) -> HttpResponse {
            let authorizer = authorizer.as_ref().map(|data| data.get_ref());
            let event = match build_event(&req, &body, authorizer) {
                Ok(event) => event,
                Err(rejection) => {
                    metrics.record_handler_response(stringify!($name), 401);
                    return rejection;
                }
            };
            let envelope = $handler(&ctx, &event).await;
            metrics.record_handler_response(stringify!($name), envelope.status_code);
            envelope.into()
        }
    };
}

envelope_route!(
    /// POST /auth/signup
    register_user => auth::register_user
);
envelope_route!(
    /// POST /auth/login
    login_user => auth::login_user
);
envelope_route!(
    /// POST /auth/confirm-signup
    confirm_signup => auth::confirm_signup
);
envelope_route!(
    /// POST /auth/resend-code
    resend_code => auth::resend_code
);
envelope_route!(get_profile => profile::get_profile);
envelope_route!(
    /// POST or PUT /profile. Replaces the whole profile.
    update_profile => profile::update_profile
);
envelope_route!(get_leaves => leave::get_leaves);
envelope_route!(submit_leave => leave::submit_leave);
envelope_route!(get_documents => document::get_documents);
envelope_route!(
    /// POST /documents. Records metadata only; the file itself goes straight to the bucket.
    upload_document => document::upload_document
);
envelope_route!(get_feedback => feedback::get_feedback);
envelope_route!(submit_feedback => feedback::submit_feedback);

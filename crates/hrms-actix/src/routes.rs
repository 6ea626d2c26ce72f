use actix_web::http::Method;
use actix_web::web;

use crate::handlers::{admin, api};

fn options() -> actix_web::Route {
    web::method(Method::OPTIONS).to(admin::preflight)
}

/// Register the HRMS API and operational endpoints.
///
/// Expects `web::Data<HandlerContext>` and `web::Data<Metrics>` on the app, and optionally
/// `web::Data<BearerAuthorizer>`. Pair with `App::default_service(web::to(admin::fallback))`
/// so preflight works on every path.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/signup")
                    .route(web::post().to(api::register_user))
                    .route(options()),
            )
            .service(
                web::resource("/login")
                    .route(web::post().to(api::login_user))
                    .route(options()),
            )
            .service(
                web::resource("/confirm-signup")
                    .route(web::post().to(api::confirm_signup))
                    .route(options()),
            )
            .service(
                web::resource("/resend-code")
                    .route(web::post().to(api::resend_code))
                    .route(options()),
            ),
    )
    .service(
        web::resource("/profile")
            .route(web::get().to(api::get_profile))
            .route(web::post().to(api::update_profile))
            .route(web::put().to(api::update_profile))
            .route(options()),
    )
    .service(
        web::resource("/leaves")
            .route(web::get().to(api::get_leaves))
            .route(web::post().to(api::submit_leave))
            .route(options()),
    )
    .service(
        web::resource("/documents")
            .route(web::get().to(api::get_documents))
            .route(web::post().to(api::upload_document))
            .route(options()),
    )
    .service(
        web::resource("/feedback")
            .route(web::get().to(api::get_feedback))
            .route(web::post().to(api::submit_feedback))
            .route(options()),
    )
    .route("/health", web::get().to(admin::health))
    .route("/ready", web::get().to(admin::readiness))
    .route("/metrics", web::get().to(admin::system_metrics));
}

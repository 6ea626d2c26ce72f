mod common;

use actix_web::{http::StatusCode, test, web, App};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use std::sync::Arc;

use hrms_backend::http::handlers::admin;
use hrms_backend::http::BearerAuthorizer;
use hrms_backend::models::{IdentityError, StoreError};
use hrms_backend::telemetry::actix::MetricsMiddleware;
use hrms_backend::telemetry::Metrics;

use common::{context, ScriptedIdentity, SpyStore};

const SECRET: &str = "integration-secret-with-at-least-32-bytes";

macro_rules! test_app {
    ($ctx:expr) => {
        test_app!($ctx, None::<BearerAuthorizer>)
    };
    ($ctx:expr, $authorizer:expr) => {{
        let metrics = Metrics::new().expect("metrics");
        let mut app = App::new()
            .app_data(web::Data::new($ctx))
            .app_data(web::Data::new(metrics.clone()));
        if let Some(authorizer) = $authorizer {
            app = app.app_data(web::Data::new(authorizer));
        }
        test::init_service(
            app.wrap(MetricsMiddleware::new(metrics))
                .configure(hrms_backend::http::configure)
                .default_service(web::to(admin::fallback)),
        )
        .await
    }};
}

fn token(sub: &str) -> String {
    let exp = (chrono::Utc::now() + chrono::Duration::minutes(5)).timestamp();
    encode(
        &Header::default(),
        &json!({ "sub": sub, "exp": exp }),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .expect("token")
}

fn spies() -> (Arc<SpyStore>, Arc<ScriptedIdentity>) {
    (
        Arc::new(SpyStore::default()),
        Arc::new(ScriptedIdentity::default()),
    )
}

fn assert_standard_headers(resp: &actix_web::dev::ServiceResponse) {
    let headers = resp.headers();
    assert_eq!(headers.get("Access-Control-Allow-Origin").unwrap(), "*");
    assert_eq!(
        headers.get("Access-Control-Allow-Methods").unwrap(),
        "GET,POST,PUT,DELETE,OPTIONS"
    );
    assert_eq!(headers.get("Content-Type").unwrap(), "application/json");
}

#[actix_web::test]
async fn leave_submission_is_listed_for_the_same_user() {
    let (store, identity) = spies();
    let app = test_app!(context(store, identity));

    let req = test::TestRequest::post()
        .uri("/leaves")
        .set_json(json!({
            "userId": "u1",
            "leaveType": "Annual",
            "startDate": "2024-07-01",
            "endDate": "2024-07-05",
            "reason": "Vacation"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_standard_headers(&resp);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Leave request submitted successfully!");
    assert_eq!(body["leaveId"], "id-1");

    let req = test::TestRequest::get()
        .uri("/leaves?userId=u1")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let leaves = body["leaves"].as_array().expect("leaves array");
    assert_eq!(leaves.len(), 1);
    assert_eq!(leaves[0]["status"], "Pending");
    assert_eq!(leaves[0]["reason"], "Vacation");

    let req = test::TestRequest::get()
        .uri("/leaves?userId=u2")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "leaves": [] }));
}

#[actix_web::test]
async fn request_without_identity_is_rejected_before_storage() {
    let (store, identity) = spies();
    let app = test_app!(context(store.clone(), identity));

    let req = test::TestRequest::get().uri("/feedback").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_standard_headers(&resp);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Unauthorized: User ID missing.");
    assert_eq!(store.calls(), 0);
}

#[actix_web::test]
async fn missing_profile_returns_empty_object() {
    let (store, identity) = spies();
    let app = test_app!(context(store, identity));

    let req = test::TestRequest::get().uri("/profile?userId=u9").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "profile": {}, "message": "Profile not found." }));
}

#[actix_web::test]
async fn profile_put_then_get_round_trips() {
    let (store, identity) = spies();
    let app = test_app!(context(store, identity));

    let req = test::TestRequest::put()
        .uri("/profile")
        .set_json(json!({
            "userId": "u1",
            "empId": "E-1",
            "name": "Ada",
            "email": "ada@example.com",
            "department": "Engineering"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Profile updated successfully.");

    let req = test::TestRequest::get().uri("/profile?userId=u1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["profile"]["empId"], "E-1");
    assert_eq!(body["profile"]["userId"], "u1");
}

#[actix_web::test]
async fn incomplete_profile_is_a_bad_request() {
    let (store, identity) = spies();
    let app = test_app!(context(store.clone(), identity));

    let req = test::TestRequest::post()
        .uri("/profile")
        .set_json(json!({ "userId": "u1", "name": "Ada" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Missing required profile fields.");
    assert_eq!(store.calls(), 0);
}

#[actix_web::test]
async fn null_profile_field_is_a_bad_request() {
    let (store, identity) = spies();
    let app = test_app!(context(store.clone(), identity));

    let req = test::TestRequest::put()
        .uri("/profile")
        .set_json(json!({
            "userId": "u1",
            "empId": null,
            "name": "Ada",
            "email": "ada@example.com",
            "department": "Engineering"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Missing required profile fields.");
    assert_eq!(store.calls(), 0);
}

#[actix_web::test]
async fn duplicate_registration_is_a_bad_request() {
    let store = Arc::new(SpyStore::default());
    let identity = Arc::new(ScriptedIdentity {
        sign_up: Some(IdentityError::UsernameExists),
        ..ScriptedIdentity::default()
    });
    let app = test_app!(context(store, identity.clone()));

    let req = test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(json!({ "email": "ada@example.com", "password": "Secret123!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Email already registered.");
    assert_eq!(identity.calls(), vec!["sign_up"]);
}

#[actix_web::test]
async fn login_reports_subject_as_user_id() {
    let store = Arc::new(SpyStore::default());
    let identity = Arc::new(ScriptedIdentity {
        subject: Some("sub-123".to_string()),
        ..ScriptedIdentity::default()
    });
    let app = test_app!(context(store, identity));

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": "ada@example.com", "password": "Secret123!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["idToken"], "id-token");
    assert_eq!(body["accessToken"], "access-token");
    assert_eq!(body["userId"], "sub-123");
}

#[actix_web::test]
async fn bearer_subject_takes_precedence_over_body_user_id() {
    let (store, identity) = spies();
    let app = test_app!(
        context(store, identity),
        Some(BearerAuthorizer::hs256(SECRET))
    );

    let req = test::TestRequest::post()
        .uri("/feedback")
        .insert_header(("Authorization", format!("Bearer {}", token("sub-1"))))
        .set_json(json!({ "userId": "spoofed", "feedback": "Great team" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/feedback")
        .insert_header(("Authorization", format!("Bearer {}", token("sub-1"))))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let feedback = body["feedback"].as_array().expect("feedback array");
    assert_eq!(feedback.len(), 1);
    assert_eq!(feedback[0]["userId"], "sub-1");
}

#[actix_web::test]
async fn invalid_bearer_token_is_unauthorized() {
    let (store, identity) = spies();
    let app = test_app!(
        context(store.clone(), identity),
        Some(BearerAuthorizer::hs256(SECRET))
    );

    let req = test::TestRequest::get()
        .uri("/leaves?userId=u1")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Unauthorized");
    assert_eq!(store.calls(), 0);
}

#[actix_web::test]
async fn document_upload_builds_bucket_reference() {
    let (store, identity) = spies();
    let app = test_app!(context(store, identity));

    let req = test::TestRequest::post()
        .uri("/documents")
        .set_json(json!({
            "userId": "u1",
            "fileName": "cv.pdf",
            "fileType": "application/pdf",
            "fileSize": 52431,
            "uploadDate": "2024-05-01"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Document metadata saved successfully!");
    assert_eq!(body["documentId"], "id-2");
    assert_eq!(body["s3Key"], "u1/id-1-cv.pdf");

    let req = test::TestRequest::get()
        .uri("/documents?userId=u1")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["documents"][0]["fileSize"], 52431);
    assert_eq!(
        body["documents"][0]["downloadUrl"],
        "https://f13tech-hrms-documents.s3.amazonaws.com/u1/id-1-cv.pdf"
    );
}

#[actix_web::test]
async fn storage_failure_is_an_internal_error() {
    let store = Arc::new(SpyStore::failing(StoreError::backend("table offline")));
    let app = test_app!(context(store, Arc::new(ScriptedIdentity::default())));

    let req = test::TestRequest::get().uri("/leaves?userId=u1").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_standard_headers(&resp);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Internal server error: table offline");
}

#[actix_web::test]
async fn preflight_is_answered_on_known_and_unknown_paths() {
    let (store, identity) = spies();
    let app = test_app!(context(store, identity));

    for uri in ["/leaves", "/auth/login", "/not-a-route"] {
        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri(uri)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK, "preflight for {uri}");
        assert_standard_headers(&resp);
    }
}

#[actix_web::test]
async fn unknown_route_is_not_found() {
    let (store, identity) = spies();
    let app = test_app!(context(store, identity));

    let req = test::TestRequest::get().uri("/payroll").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn health_ready_and_metrics_endpoints() {
    let (store, identity) = spies();
    let app = test_app!(context(store, identity));

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "hrms_backend");

    let req = test::TestRequest::get().uri("/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/feedback?userId=u1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf8");
    assert!(text.contains("hrms_handler_responses_total"));
    assert!(text.contains("get_feedback"));
}

#[actix_web::test]
async fn readiness_fails_when_store_is_down() {
    let store = Arc::new(SpyStore::failing(StoreError::backend("down")));
    let app = test_app!(context(store, Arc::new(ScriptedIdentity::default())));

    let req = test::TestRequest::get().uri("/ready").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

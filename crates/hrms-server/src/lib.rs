//! Process assembly: configuration, telemetry, collaborators and the HTTP server.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use hrms_actix::handlers::admin;
use hrms_actix::BearerAuthorizer;
use hrms_config::Config;
use hrms_handlers::HandlerContext;
use hrms_identity_cognito::CognitoIdentityProvider;
use hrms_observability::actix::MetricsMiddleware;
use hrms_observability::{Metrics, ObservedIdentityProvider};
use hrms_openapi::ApiDoc;
use hrms_ports::{DynIdentityProvider, UuidGenerator};

pub const SERVICE_NAME: &str = "hrms_backend";

fn other_io_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

/// Build the identity provider described by `config`, wrapped for tracing.
pub fn identity_provider(config: &Config) -> std::io::Result<DynIdentityProvider> {
    let identity = &config.identity;
    let provider = match &identity.endpoint {
        Some(endpoint) => {
            CognitoIdentityProvider::with_endpoint(endpoint.clone(), identity.client_id.clone())
        }
        None => CognitoIdentityProvider::new(&identity.region, identity.client_id.clone()),
    }
    .map_err(other_io_error)?;

    tracing::info!(
        region = %identity.region,
        user_pool_id = identity.user_pool_id.as_deref().unwrap_or("unset"),
        endpoint = identity.endpoint.as_deref().unwrap_or("regional"),
        "identity provider configured"
    );

    Ok(Arc::new(ObservedIdentityProvider::new(
        Arc::new(provider),
        "cognito",
    )))
}

/// Assemble every collaborator the handlers need. The store is initialized here.
pub async fn build_context(config: &Config) -> std::io::Result<HandlerContext> {
    let store = hrms_storage_factory::create_store(&config.database.url)
        .await
        .map_err(other_io_error)?;
    store.init().await.map_err(other_io_error)?;

    Ok(HandlerContext::new(
        store,
        identity_provider(config)?,
        Arc::new(UuidGenerator),
        config.tables(),
        config.document_bucket(),
    ))
}

pub async fn run() -> std::io::Result<()> {
    if let Err(err) = hrms_observability::init_telemetry(SERVICE_NAME) {
        eprintln!("telemetry initialization failed: {err}");
    }

    let config = Config::default();
    if let Err(problem) = config.validate_for_production() {
        tracing::warn!(%problem, "configuration is not production ready");
    }
    match serde_json::to_string(&config.sanitized()) {
        Ok(rendered) => tracing::info!(config = %rendered, "configuration loaded"),
        Err(err) => tracing::warn!(error = %err, "could not render configuration"),
    }

    let ctx = build_context(&config).await?;
    let metrics = Metrics::new().map_err(other_io_error)?;
    let authorizer = config
        .auth
        .as_ref()
        .map(|auth| BearerAuthorizer::hs256(&auth.jwt_secret));
    if authorizer.is_none() {
        tracing::warn!("HRMS_JWT_SECRET not set; bearer tokens are ignored and identity comes from the request");
    } else {
        tracing::warn!("bearer tokens are verified with HS256; Cognito ID tokens issued at login are RS256 and will be rejected");
    }

    let bind_addr = (config.server.host.clone(), config.server.port);
    tracing::info!(host = %bind_addr.0, port = bind_addr.1, "starting HRMS backend");

    let ctx = web::Data::new(ctx);
    let metrics_data = web::Data::new(metrics.clone());
    let authorizer = authorizer.map(web::Data::new);
    let openapi = ApiDoc::openapi();

    let server = HttpServer::new(move || {
        let mut app = App::new()
            .app_data(ctx.clone())
            .app_data(metrics_data.clone());
        if let Some(authorizer) = &authorizer {
            app = app.app_data(authorizer.clone());
        }

        app.wrap(MetricsMiddleware::new(metrics.clone()))
            .wrap(TracingLogger::default())
            .configure(hrms_actix::configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            .default_service(web::to(admin::fallback))
    })
    .bind(bind_addr)?
    .run();

    let result = server.await;
    hrms_observability::shutdown_telemetry();
    result
}

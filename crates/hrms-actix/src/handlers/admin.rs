use actix_web::http::Method;
use actix_web::{web, HttpRequest, HttpResponse, Result};

use hrms_core::{standard_headers, ResponseEnvelope};
use hrms_handlers::HandlerContext;
use hrms_observability::Metrics;

/// Get system metrics
pub async fn system_metrics(metrics: web::Data<Metrics>) -> Result<HttpResponse> {
    let buffer = hrms_observability::encode_prometheus_text(&metrics.registry)
        .map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer))
}

/// Health check endpoint
pub async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "hrms_backend",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

/// Readiness check endpoint
pub async fn readiness(ctx: web::Data<HandlerContext>) -> Result<HttpResponse> {
    ctx.store
        .healthcheck()
        .await
        .map_err(actix_web::error::ErrorServiceUnavailable)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ready",
        "checks": {
            "database": "ok"
        }
    })))
}

fn preflight_envelope() -> ResponseEnvelope {
    ResponseEnvelope {
        status_code: 200,
        headers: standard_headers(),
        body: "{}".to_string(),
    }
}

/// CORS preflight: 200 with the standard headers.
pub async fn preflight() -> HttpResponse {
    preflight_envelope().into()
}

/// Default service: answers preflight on any path, 404 otherwise.
pub async fn fallback(req: HttpRequest) -> HttpResponse {
    if req.method() == Method::OPTIONS {
        return preflight_envelope().into();
    }
    ResponseEnvelope::message(404, "Not Found").into()
}

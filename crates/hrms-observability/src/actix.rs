//! Actix middleware feeding [`Metrics`] with one sample per served request.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::{Error, ResponseError};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::time::Instant;

use crate::Metrics;

/// Route label for `OPTIONS` requests answered by the default service.
pub const PREFLIGHT_ROUTE: &str = "preflight";
/// Route label for every other request that matched no resource.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Route label for a request. Only registered patterns are used, so path parameters and
/// unknown paths never become label values.
fn route_label(method: &Method, pattern: Option<String>) -> String {
    match pattern {
        Some(pattern) => pattern,
        None if method == Method::OPTIONS => PREFLIGHT_ROUTE.to_string(),
        None => UNMATCHED_ROUTE.to_string(),
    }
}

/// Tracks in-flight requests and records method, route and status for every response,
/// including requests that fail inside the service chain.
pub struct MetricsMiddleware {
    metrics: Metrics,
}

impl MetricsMiddleware {
    pub fn new(metrics: Metrics) -> Self {
        Self { metrics }
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MetricsService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MetricsService {
            inner: Rc::new(service),
            metrics: self.metrics.clone(),
        }))
    }
}

pub struct MetricsService<S> {
    inner: Rc<S>,
    metrics: Metrics,
}

impl<S, B> Service<ServiceRequest> for MetricsService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(inner);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let method = req.method().clone();
        let pattern = req.match_pattern();
        let metrics = self.metrics.clone();
        let inner = Rc::clone(&self.inner);

        metrics.http_requests_in_flight.inc();

        Box::pin(async move {
            let outcome = inner.call(req).await;
            metrics.http_requests_in_flight.dec();

            let (pattern, status) = match &outcome {
                Ok(res) => (res.request().match_pattern().or(pattern), res.status()),
                Err(err) => (pattern, err.as_response_error().status_code()),
            };
            metrics.record_http_request(
                method.as_str(),
                &route_label(&method, pattern),
                status.as_u16(),
                started.elapsed(),
            );

            outcome
        })
    }
}

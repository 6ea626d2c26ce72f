use prometheus::{
    Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
};
use std::time::Duration;

const ROUTE_LABELS: [&str; 3] = ["method", "route", "status"];

/// Prometheus collectors for the HTTP surface and the handlers behind it.
///
/// Cloning shares the underlying collectors.
#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_total_by_route: IntCounterVec,
    pub http_request_duration_seconds_by_route: HistogramVec,
    pub http_requests_in_flight: IntGauge,
    /// Handler outcomes keyed by operation name and envelope status code.
    pub handler_responses_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = IntCounter::with_opts(Opts::new(
            "hrms_http_requests_total",
            "Total number of HTTP requests received",
        ))?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "hrms_http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_total_by_route = IntCounterVec::new(
            Opts::new(
                "hrms_http_requests_by_route_total",
                "HTTP requests by method, matched route and status",
            ),
            &ROUTE_LABELS,
        )?;
        let http_request_duration_seconds_by_route = HistogramVec::new(
            HistogramOpts::new(
                "hrms_http_request_duration_by_route_seconds",
                "HTTP request latency by method, matched route and status",
            ),
            &ROUTE_LABELS,
        )?;
        let http_requests_in_flight = IntGauge::with_opts(Opts::new(
            "hrms_http_requests_in_flight",
            "HTTP requests currently being served",
        ))?;
        let handler_responses_total = IntCounterVec::new(
            Opts::new(
                "hrms_handler_responses_total",
                "Handler responses by operation and status code",
            ),
            &["operation", "status"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_total_by_route.clone()))?;
        registry.register(Box::new(http_request_duration_seconds_by_route.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(handler_responses_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_total_by_route,
            http_request_duration_seconds_by_route,
            http_requests_in_flight,
            handler_responses_total,
        })
    }

    /// Record one finished HTTP request under its matched route pattern.
    pub fn record_http_request(
        &self,
        method: &str,
        route: &str,
        status_code: u16,
        elapsed: Duration,
    ) {
        let status = status_code.to_string();
        let labels = [method, route, status.as_str()];
        let seconds = elapsed.as_secs_f64();

        self.http_requests_total.inc();
        self.http_request_duration_seconds.observe(seconds);
        self.http_requests_total_by_route
            .with_label_values(&labels)
            .inc();
        self.http_request_duration_seconds_by_route
            .with_label_values(&labels)
            .observe(seconds);
    }

    pub fn record_handler_response(&self, operation: &str, status_code: u16) {
        let status = status_code.to_string();
        self.handler_responses_total
            .with_label_values(&[operation, status.as_str()])
            .inc();
    }
}

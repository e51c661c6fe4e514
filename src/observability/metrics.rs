//! Metrics collection and exposition.
//!
//! # Metrics
//! - `comptoir_requests_total` (counter): requests by service, method, status
//! - `comptoir_request_duration_seconds` (histogram): latency by service

use std::net::SocketAddr;
use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "failed to start metrics endpoint"),
    }
}

/// Axum middleware recording one counter increment and one latency sample
/// per request.
pub async fn track_request(service: String, req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();

    let response = next.run(req).await;

    record_request(&service, &method, response.status().as_u16(), start);
    response
}

/// Record one completed request.
pub fn record_request(service: &str, method: &str, status: u16, start: Instant) {
    counter!(
        "comptoir_requests_total",
        "service" => service.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        "comptoir_request_duration_seconds",
        "service" => service.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

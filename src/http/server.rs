//! Server setup shared by the three services.
//!
//! # Responsibilities
//! - Wire up the common middleware stack (tracing, timeout, request ID,
//!   request metrics)
//! - Serve a router with graceful shutdown

use std::time::Duration;

use axum::{extract::Request, middleware::Next, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::http::request::RequestIdLayer;
use crate::observability::metrics;

/// Apply the common middleware stack to a service router.
pub fn apply_layers(router: Router, service_name: &str, config: &AppConfig) -> Router {
    let service = service_name.to_string();
    router
        .layer(axum::middleware::from_fn(move |req: Request, next: Next| {
            let service = service.clone();
            async move { metrics::track_request(service, req, next).await }
        }))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.timeouts.inbound_request_secs,
        )))
        .layer(RequestIdLayer)
        .layer(TraceLayer::new_for_http())
}

/// Serve a router until the shutdown signal fires.
pub async fn serve(
    app: Router,
    listener: TcpListener,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "HTTP server starting");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
        })
        .await?;

    tracing::info!(address = %addr, "HTTP server stopped");
    Ok(())
}

//! Request forwarding to resolved upstreams.
//!
//! # Responsibilities
//! - Resolve the logical service name via the injected resolver
//! - Issue an HTTP GET with a deadline and parse the JSON body
//! - Surface every failure mode as a [`ForwardError`] so the circuit
//!   breaker can record it

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;
use tokio::time;

use crate::gateway::resolver::UpstreamResolver;

/// Upper bound on an upstream response body.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Failure outcomes of one forwarded call. All of them count as circuit
/// failures.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("no upstream registered for service {0}")]
    Unresolved(String),

    #[error("upstream request failed: {0}")]
    Connect(String),

    #[error("upstream returned status {0}")]
    Status(StatusCode),

    #[error("upstream timed out after {0:?}")]
    Timeout(Duration),

    #[error("upstream body unreadable or not JSON: {0}")]
    Body(String),
}

/// Issues GETs to resolved upstreams and returns parsed JSON bodies.
#[derive(Clone)]
pub struct Forwarder {
    client: Client<HttpConnector, Body>,
    resolver: Arc<dyn UpstreamResolver>,
    request_timeout: Duration,
}

impl Forwarder {
    pub fn new(resolver: Arc<dyn UpstreamResolver>, request_timeout: Duration) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self {
            client,
            resolver,
            request_timeout,
        }
    }

    /// Forward a GET for `path` to an instance of `service` and return the
    /// upstream's JSON body verbatim.
    pub async fn forward(
        &self,
        service: &str,
        path: &str,
    ) -> Result<serde_json::Value, ForwardError> {
        let base = self
            .resolver
            .resolve(service)
            .ok_or_else(|| ForwardError::Unresolved(service.to_string()))?;

        let uri = format!("{}{}", base.as_str().trim_end_matches('/'), path);
        tracing::debug!(service = %service, uri = %uri, "forwarding upstream call");

        let request = Request::builder()
            .method("GET")
            .uri(&uri)
            .header("user-agent", "comptoir-gateway")
            .body(Body::empty())
            .map_err(|e| ForwardError::Connect(e.to_string()))?;

        let response = time::timeout(self.request_timeout, self.client.request(request))
            .await
            .map_err(|_| ForwardError::Timeout(self.request_timeout))?
            .map_err(|e| ForwardError::Connect(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForwardError::Status(status));
        }

        let bytes = axum::body::to_bytes(Body::new(response.into_body()), MAX_BODY_BYTES)
            .await
            .map_err(|e| ForwardError::Body(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| ForwardError::Body(e.to_string()))
    }
}

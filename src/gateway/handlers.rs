//! HTTP surface of the gateway.
//!
//! # Responsibilities
//! - `/produits`, `/commandes`: plain pass-through; upstream failure → 502
//! - `/cb/*`: circuit-breaker wrapped; always 200 with live or fallback data
//! - `/fallback/*`: the static payloads directly
//!
//! # Design Decisions
//! - Explicit route table with explicit breaker wrapping per handler, not
//!   interception; the circuit and fallback for each resource are named
//!   right where the route is declared

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::gateway::circuit_breaker::CircuitRegistry;
use crate::gateway::fallback;
use crate::gateway::forwarder::Forwarder;

/// State injected into the gateway handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub forwarder: Arc<Forwarder>,
    pub circuits: Arc<CircuitRegistry>,
}

/// Build the gateway router.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/produits", get(produits_passthrough))
        .route("/commandes", get(commandes_passthrough))
        .route("/cb/produits", get(produits_guarded))
        .route("/cb/commandes", get(commandes_guarded))
        .route("/fallback/produits", get(produits_fallback))
        .route("/fallback/commandes", get(commandes_fallback))
        .route("/health", get(health_check))
        .with_state(state)
}

async fn produits_passthrough(State(state): State<GatewayState>) -> Response {
    passthrough(&state, "microservice-produits", "/produits").await
}

async fn commandes_passthrough(State(state): State<GatewayState>) -> Response {
    passthrough(&state, "microservice-commandes", "/commandes").await
}

async fn produits_guarded(State(state): State<GatewayState>) -> Json<Value> {
    guarded(
        &state,
        "produitsCB",
        "microservice-produits",
        "/produits",
        fallback::produits,
    )
    .await
}

async fn commandes_guarded(State(state): State<GatewayState>) -> Json<Value> {
    guarded(
        &state,
        "commandesCB",
        "microservice-commandes",
        "/commandes",
        fallback::commandes,
    )
    .await
}

async fn produits_fallback() -> Json<Value> {
    Json(fallback::produits())
}

async fn commandes_fallback() -> Json<Value> {
    Json(fallback::commandes())
}

async fn health_check() -> Json<Value> {
    Json(serde_json::json!({ "status": "UP" }))
}

/// Forward without a breaker. Upstream failure surfaces as 502.
async fn passthrough(state: &GatewayState, service: &str, path: &str) -> Response {
    match state.forwarder.forward(service, path).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            tracing::error!(service = %service, error = %e, "pass-through upstream error");
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

/// Forward through the named circuit. Never errors: open circuit or failed
/// call yields the fallback payload with a 200.
async fn guarded(
    state: &GatewayState,
    circuit_name: &str,
    service: &str,
    path: &str,
    fallback_payload: fn() -> Value,
) -> Json<Value> {
    let circuit = state.circuits.get(circuit_name);

    if !circuit.try_acquire() {
        tracing::warn!(circuit = %circuit_name, "circuit open, serving fallback");
        return Json(fallback_payload());
    }

    match state.forwarder.forward(service, path).await {
        Ok(body) => {
            circuit.record_success();
            Json(body)
        }
        Err(e) => {
            circuit.record_failure();
            tracing::warn!(circuit = %circuit_name, error = %e, "upstream call failed, serving fallback");
            Json(fallback_payload())
        }
    }
}

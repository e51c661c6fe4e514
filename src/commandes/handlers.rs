//! HTTP surface of the commandes microservice.
//!
//! # Responsibilities
//! - Map verbs/paths to [`CommandeService`] calls
//! - Read `commandes-last` from the current config snapshot on each
//!   `GET /commandes/last`, so reloads apply without restart
//!
//! # Design Decisions
//! - PUT requires the record to exist (404 otherwise) and then fully
//!   replaces it; an unset date in the replacement body is defaulted the
//!   same way a create is
//! - `/commandes/last` is registered alongside `/commandes/{id}`; the
//!   static segment wins route matching

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::commandes::service::CommandeService;
use crate::config::SharedConfig;
use crate::domain::Commande;
use crate::health;

/// State injected into the commandes handlers.
#[derive(Clone)]
pub struct CommandesState {
    pub service: Arc<CommandeService>,
    pub config: SharedConfig,
}

/// Build the commandes router.
pub fn router(state: CommandesState) -> Router {
    Router::new()
        .route("/commandes", get(list).post(create))
        .route("/commandes/last", get(last))
        .route("/commandes/{id}", get(get_one).put(update).delete(remove))
        .route("/health", get(health_check))
        .with_state(state)
}

async fn list(State(state): State<CommandesState>) -> Json<Vec<Commande>> {
    Json(state.service.find_all())
}

async fn get_one(State(state): State<CommandesState>, Path(id): Path<i64>) -> Response {
    match state.service.find_by_id(id) {
        Some(commande) => Json(commande).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn create(
    State(state): State<CommandesState>,
    Json(commande): Json<Commande>,
) -> Json<Commande> {
    let saved = state.service.save(commande);
    tracing::debug!(id = ?saved.id, date = ?saved.date, "commande created");
    Json(saved)
}

async fn update(
    State(state): State<CommandesState>,
    Path(id): Path<i64>,
    Json(mut commande): Json<Commande>,
) -> Response {
    if state.service.find_by_id(id).is_none() {
        return StatusCode::NOT_FOUND.into_response();
    }
    commande.id = Some(id);
    Json(state.service.save(commande)).into_response()
}

async fn remove(State(state): State<CommandesState>, Path(id): Path<i64>) -> StatusCode {
    state.service.delete(id);
    StatusCode::NO_CONTENT
}

/// Commandes of the last N days, N from the hot-reloadable config.
async fn last(State(state): State<CommandesState>) -> Json<Vec<Commande>> {
    let n_days = state.config.snapshot().commandes.commandes_last;
    tracing::debug!(n_days, "recent commandes query");
    Json(state.service.find_recent(n_days))
}

/// UP when the collection is non-empty, DOWN (503) otherwise.
async fn health_check(State(state): State<CommandesState>) -> Response {
    health::table_report("commande", state.service.count())
}

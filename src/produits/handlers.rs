//! HTTP surface of the produits microservice.
//!
//! # Responsibilities
//! - Map verbs/paths to [`ProduitService`] calls
//! - No business logic beyond request/response shaping
//!
//! # Design Decisions
//! - `findById` miss is 404 with empty body, not an error payload
//! - PUT forces the path id onto the body then saves (full replacement)

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::domain::Produit;
use crate::health;
use crate::produits::service::ProduitService;

/// Build the produits router.
pub fn router(service: Arc<ProduitService>) -> Router {
    Router::new()
        .route("/produits", get(list).post(create))
        .route("/produits/{id}", get(get_one).put(update).delete(remove))
        .route("/health", get(health_check))
        .with_state(service)
}

async fn list(State(service): State<Arc<ProduitService>>) -> Json<Vec<Produit>> {
    Json(service.find_all())
}

async fn get_one(
    State(service): State<Arc<ProduitService>>,
    Path(id): Path<i64>,
) -> Response {
    match service.find_by_id(id) {
        Some(produit) => Json(produit).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn create(
    State(service): State<Arc<ProduitService>>,
    Json(produit): Json<Produit>,
) -> Json<Produit> {
    let saved = service.save(produit);
    tracing::debug!(id = ?saved.id, nom = %saved.nom, "produit created");
    Json(saved)
}

async fn update(
    State(service): State<Arc<ProduitService>>,
    Path(id): Path<i64>,
    Json(mut produit): Json<Produit>,
) -> Json<Produit> {
    produit.id = Some(id);
    Json(service.save(produit))
}

async fn remove(State(service): State<Arc<ProduitService>>, Path(id): Path<i64>) -> StatusCode {
    service.delete(id);
    StatusCode::NO_CONTENT
}

async fn health_check(State(service): State<Arc<ProduitService>>) -> Response {
    health::count_report("produit", service.count())
}

//! Health reporting for the services.
//!
//! # Design Decisions
//! - Commandes health mirrors the original indicator: UP only when the
//!   collection holds at least one row, DOWN (503) otherwise
//! - Produits has no emptiness rule; its report is always UP with the
//!   current row count as detail

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// UP/DOWN report based on collection emptiness.
pub fn table_report(table: &str, count: usize) -> Response {
    if count > 0 {
        (
            StatusCode::OK,
            Json(json!({
                "status": "UP",
                "details": {
                    "message": format!("Table {table} non vide"),
                    (format!("nombre_{table}s")): count,
                },
            })),
        )
            .into_response()
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "DOWN",
                "details": {
                    "message": format!("Table {table} vide"),
                    (format!("nombre_{table}s")): 0,
                },
            })),
        )
            .into_response()
    }
}

/// Always-UP report with a row-count detail.
pub fn count_report(table: &str, count: usize) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "status": "UP",
            "details": { (format!("nombre_{table}s")): count },
        })),
    )
        .into_response()
}

//! Static fallback payloads.
//!
//! Fixed structures keyed by resource type: a sentinel record with id −1
//! and a human-readable message. Served whenever a circuit is open or an
//! upstream call fails, and directly on the `/fallback/*` routes.

use serde_json::{json, Value};

/// Message attached to every fallback record.
pub const FALLBACK_MESSAGE: &str = "Réponse fournie par la Gateway (comptoir)";

/// Sentinel produit list served when microservice-produits is unavailable.
pub fn produits() -> Value {
    json!([{
        "id": -1,
        "nom": "Produit indisponible (fallback)",
        "prix": 0,
        "message": FALLBACK_MESSAGE,
    }])
}

/// Sentinel commande list served when microservice-commandes is unavailable.
pub fn commandes() -> Value {
    json!([{
        "id": -1,
        "description": "Commande indisponible (fallback)",
        "quantite": 0,
        "montant": 0,
        "message": FALLBACK_MESSAGE,
    }])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_produits_fallback_shape() {
        let payload = produits();
        let list = payload.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["id"], -1);
        assert_eq!(list[0]["nom"], "Produit indisponible (fallback)");
        assert_eq!(list[0]["prix"], 0);
    }

    #[test]
    fn test_commandes_fallback_shape() {
        let payload = commandes();
        let list = payload.as_array().unwrap();
        assert_eq!(list[0]["id"], -1);
        assert_eq!(list[0]["description"], "Commande indisponible (fallback)");
        assert_eq!(list[0]["quantite"], 0);
    }
}

//! Produit orchestration over the backing store.

use std::sync::Arc;

use crate::domain::Produit;
use crate::store::MemoryStore;

/// Thin pass-through service; no business rules on produits.
#[derive(Debug, Clone)]
pub struct ProduitService {
    store: Arc<MemoryStore<Produit>>,
}

impl ProduitService {
    pub fn new(store: Arc<MemoryStore<Produit>>) -> Self {
        Self { store }
    }

    /// All produits in insertion order; empty Vec when the store is empty.
    pub fn find_all(&self) -> Vec<Produit> {
        self.store.find_all()
    }

    /// The produit with the given id, or `None`.
    pub fn find_by_id(&self, id: i64) -> Option<Produit> {
        self.store.find_by_id(id)
    }

    /// Insert or fully replace; returns the persisted record.
    pub fn save(&self, produit: Produit) -> Produit {
        self.store.save(produit)
    }

    /// Remove by id; no-op when absent.
    pub fn delete(&self, id: i64) {
        self.store.delete(id);
    }

    /// Row count, used by the health endpoint.
    pub fn count(&self) -> usize {
        self.store.count()
    }
}

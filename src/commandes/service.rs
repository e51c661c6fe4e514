//! Commande orchestration over the backing store.
//!
//! Two rules live here, and nowhere else:
//! - a commande saved without a date gets today's date
//! - `find_recent(n)` returns commandes strictly newer than `today − n` days

use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate};

use crate::domain::Commande;
use crate::store::MemoryStore;

#[derive(Debug, Clone)]
pub struct CommandeService {
    store: Arc<MemoryStore<Commande>>,
}

impl CommandeService {
    pub fn new(store: Arc<MemoryStore<Commande>>) -> Self {
        Self { store }
    }

    /// All commandes in insertion order; empty Vec when the store is empty.
    pub fn find_all(&self) -> Vec<Commande> {
        self.store.find_all()
    }

    /// The commande with the given id, or `None`.
    pub fn find_by_id(&self, id: i64) -> Option<Commande> {
        self.store.find_by_id(id)
    }

    /// Insert or fully replace, defaulting an unset date to today.
    /// Returns the persisted record.
    pub fn save(&self, mut commande: Commande) -> Commande {
        if commande.date.is_none() {
            commande.date = Some(today());
        }
        self.store.save(commande)
    }

    /// Remove by id; no-op when absent.
    pub fn delete(&self, id: i64) {
        self.store.delete(id);
    }

    /// Commandes whose date is strictly after `today − n_days`.
    /// A record dated exactly `today − n_days` is excluded.
    pub fn find_recent(&self, n_days: u32) -> Vec<Commande> {
        let min_date = today() - Duration::days(i64::from(n_days));
        self.store
            .find_where(|c| c.date.map(|d| d > min_date).unwrap_or(false))
    }

    /// Row count, used by the health endpoint.
    pub fn count(&self) -> usize {
        self.store.count()
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

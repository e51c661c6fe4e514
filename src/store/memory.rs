//! In-memory backing store.
//!
//! # Responsibilities
//! - Hold one collection of records in insertion order
//! - Assign monotonically increasing identities on insert
//! - Replace the whole row on save-with-id
//!
//! # Design Decisions
//! - `RwLock` over the rows; operations are short and never await while
//!   holding the lock
//! - Saving with an id that does not exist inserts the row as-is (and bumps
//!   the sequence past it), mirroring upsert semantics

use std::sync::RwLock;

use crate::store::Entity;

/// A single in-memory collection of records.
#[derive(Debug)]
pub struct MemoryStore<T> {
    inner: RwLock<Rows<T>>,
}

#[derive(Debug)]
struct Rows<T> {
    rows: Vec<T>,
    next_id: i64,
}

impl<T: Entity> MemoryStore<T> {
    /// Create an empty store. Identities start at 1.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Rows {
                rows: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// All records, in insertion order. Empty store yields an empty Vec.
    pub fn find_all(&self) -> Vec<T> {
        self.inner.read().expect("store lock poisoned").rows.clone()
    }

    /// The record with the given id, or `None`.
    pub fn find_by_id(&self, id: i64) -> Option<T> {
        self.inner
            .read()
            .expect("store lock poisoned")
            .rows
            .iter()
            .find(|r| r.id() == Some(id))
            .cloned()
    }

    /// Insert (assigning an id) or fully replace the record with the same
    /// id. Returns the persisted record.
    pub fn save(&self, mut record: T) -> T {
        let mut guard = self.inner.write().expect("store lock poisoned");
        match record.id() {
            None => {
                record.assign_id(guard.next_id);
                guard.next_id += 1;
                guard.rows.push(record.clone());
            }
            Some(id) => {
                if let Some(slot) = guard.rows.iter_mut().find(|r| r.id() == Some(id)) {
                    *slot = record.clone();
                } else {
                    guard.rows.push(record.clone());
                    if id >= guard.next_id {
                        guard.next_id = id + 1;
                    }
                }
            }
        }
        record
    }

    /// Remove the record with the given id. No-op when absent.
    pub fn delete(&self, id: i64) {
        self.inner
            .write()
            .expect("store lock poisoned")
            .rows
            .retain(|r| r.id() != Some(id));
    }

    /// All records matching the predicate, in insertion order.
    pub fn find_where(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.inner
            .read()
            .expect("store lock poisoned")
            .rows
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    /// Number of records currently held.
    pub fn count(&self) -> usize {
        self.inner.read().expect("store lock poisoned").rows.len()
    }
}

impl<T: Entity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Produit;

    fn produit(nom: &str, prix: f64) -> Produit {
        Produit {
            id: None,
            nom: nom.to_string(),
            prix,
        }
    }

    #[test]
    fn test_save_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let a = store.save(produit("a", 1.0));
        let b = store.save(produit("b", 2.0));
        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));
    }

    #[test]
    fn test_round_trip() {
        let store = MemoryStore::new();
        let saved = store.save(produit("Clavier", 49.9));
        let found = store.find_by_id(saved.id.unwrap());
        assert_eq!(found, Some(saved));
    }

    #[test]
    fn test_find_all_preserves_insertion_order() {
        let store = MemoryStore::new();
        store.save(produit("a", 1.0));
        store.save(produit("b", 2.0));
        store.save(produit("c", 3.0));
        let noms: Vec<String> = store.find_all().into_iter().map(|p| p.nom).collect();
        assert_eq!(noms, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_save_with_id_replaces_whole_row() {
        let store = MemoryStore::new();
        let saved = store.save(produit("avant", 1.0));
        let id = saved.id.unwrap();

        store.save(Produit {
            id: Some(id),
            nom: "après".to_string(),
            prix: 9.0,
        });

        assert_eq!(store.count(), 1);
        let found = store.find_by_id(id).unwrap();
        assert_eq!(found.nom, "après");
        assert_eq!(found.prix, 9.0);
    }

    #[test]
    fn test_save_with_unknown_id_inserts_and_bumps_sequence() {
        let store = MemoryStore::new();
        store.save(Produit {
            id: Some(10),
            nom: "x".to_string(),
            prix: 1.0,
        });
        let next = store.save(produit("y", 2.0));
        assert_eq!(next.id, Some(11));
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let store = MemoryStore::new();
        store.save(produit("a", 1.0));
        store.delete(99);
        assert_eq!(store.count(), 1);
        store.delete(1);
        assert_eq!(store.count(), 0);
        assert_eq!(store.find_by_id(1), None);
    }
}

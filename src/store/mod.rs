//! Backing store subsystem.
//!
//! # Data Flow
//! ```text
//! handler → service → MemoryStore<T>
//!     find_all / find_by_id / save / delete / find_where / count
//! ```
//!
//! # Design Decisions
//! - "Not found" is an absent result (`Option`/empty Vec), never an error
//! - Insertion order is preserved and is the order `find_all` returns
//! - The store assigns identities; a record saved with an id is a full
//!   replacement of the existing row

pub mod memory;

pub use memory::MemoryStore;

/// A storable record with an integer identity.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Current identity, if the store has assigned one.
    fn id(&self) -> Option<i64>;

    /// Stamp a store-assigned identity onto the record.
    fn assign_id(&mut self, id: i64);
}

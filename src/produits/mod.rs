//! Produits microservice.
//!
//! # Data Flow
//! ```text
//! GET/POST /produits, GET/PUT/DELETE /produits/{id}
//!     → handlers.rs (request/response shaping only)
//!     → service.rs (pass-through orchestration)
//!     → MemoryStore<Produit>
//! ```

pub mod handlers;
pub mod service;

pub use service::ProduitService;

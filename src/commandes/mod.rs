//! Commandes microservice.
//!
//! # Data Flow
//! ```text
//! GET/POST /commandes, GET/PUT/DELETE /commandes/{id}, GET /commandes/last
//!     → handlers.rs (request/response shaping; reads commandes-last from
//!       the current config snapshot)
//!     → service.rs (date defaulting + recent-window query)
//!     → MemoryStore<Commande>
//! ```

pub mod handlers;
pub mod service;

pub use handlers::CommandesState;
pub use service::CommandeService;

//! HTTP plumbing shared by all three services.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (layer stack, graceful shutdown)
//!     → request.rs (x-request-id injection)
//!     → service router (produits / commandes / gateway)
//! ```

pub mod request;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::{apply_layers, serve};

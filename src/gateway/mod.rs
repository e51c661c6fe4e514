//! API gateway.
//!
//! # Data Flow
//! ```text
//! GET /cb/{resource}
//!     → handlers.rs (pick circuit + fallback for the resource)
//!     → circuit_breaker.rs (CLOSED/HALF_OPEN: admit; OPEN: fast-fail)
//!     → forwarder.rs (resolve logical name, GET, parse JSON body)
//!     → resolver.rs (logical name → instance URL, round-robin)
//!
//! Any failure outcome (unresolved, connect, timeout, non-2xx, bad body)
//! is recorded against the circuit and converted into the static fallback
//! payload. /cb/* never surfaces an error to the caller.
//! ```
//!
//! # Design Decisions
//! - Circuits are named per resource (`produitsCB`, `commandesCB`) and held
//!   in a registry injected into the handlers, not ambient state
//! - Fallback payloads are fixed structures (sentinel record with id −1),
//!   byte-stable for frontend consumption

pub mod circuit_breaker;
pub mod fallback;
pub mod forwarder;
pub mod handlers;
pub mod resolver;

pub use circuit_breaker::{CircuitBreaker, CircuitRegistry, CircuitState};
pub use forwarder::{ForwardError, Forwarder};
pub use handlers::GatewayState;
pub use resolver::{StaticResolver, UpstreamResolver};

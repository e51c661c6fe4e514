//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → runtime.rs (SharedConfig: arc-swap snapshot)
//!
//! On reload signal:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → SharedConfig::replace (atomic swap)
//!     → next request observes new snapshot
//! ```
//!
//! # Design Decisions
//! - Config snapshots are immutable; readers take an `Arc` per request so
//!   `commandes-last` and circuit-breaker tuning refresh without restart
//! - All fields have defaults to allow minimal (or absent) config files
//! - An invalid reload is rejected and logged; the running config is kept

pub mod loader;
pub mod runtime;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use runtime::SharedConfig;
pub use schema::{
    AppConfig, CircuitBreakerConfig, CommandesConfig, GatewayConfig, ObservabilityConfig,
    ServiceConfig, TimeoutConfig, UpstreamConfig,
};

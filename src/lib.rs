//! comptoir — produits/commandes microservices with a resilient API gateway.
//!
//! One binary, three services selected by subcommand:
//! `comptoir produits`, `comptoir commandes`, `comptoir gateway`.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                  GATEWAY                     │
//!     Client Request   │  ┌──────────┐   ┌───────────────┐           │
//!     ─────────────────┼─▶│ handlers │──▶│circuit breaker│           │
//!                      │  └──────────┘   └──────┬────────┘           │
//!                      │        │               │ closed/trial       │
//!                      │        │ open          ▼                    │
//!                      │        ▼        ┌───────────┐ ┌──────────┐  │   ┌─────────────┐
//!                      │  ┌──────────┐   │ forwarder │▶│ resolver │──┼──▶│ produits /  │
//!     Client Response  │  │ fallback │   └───────────┘ └──────────┘  │   │ commandes   │
//!     ◀────────────────┼──│ payload  │                               │   │ service     │
//!                      │  └──────────┘                               │   └──────┬──────┘
//!                      └──────────────────────────────────────────────┘        │
//!                                                                              ▼
//!                      ┌──────────────────────────────────────────────┐  ┌───────────┐
//!                      │          Cross-Cutting Concerns              │  │ in-memory │
//!                      │  ┌────────┐ ┌────────┐ ┌─────────────┐       │  │   store   │
//!                      │  │ config │ │ health │ │observability│       │  └───────────┘
//!                      │  │+reload │ │        │ │             │       │
//!                      │  └────────┘ └────────┘ └─────────────┘       │
//!                      │  ┌──────────────────────────────────┐        │
//!                      │  │            lifecycle             │        │
//!                      │  └──────────────────────────────────┘        │
//!                      └──────────────────────────────────────────────┘
//! ```
//!
//! The CRUD services are deliberately thin: handler → service → store, with
//! one default-value rule (commandes get today's date when unset) and one
//! derived query (commandes newer than N days, N hot-reloadable). The only
//! real state machine lives in [`gateway::circuit_breaker`].

// Domain services
pub mod commandes;
pub mod domain;
pub mod produits;
pub mod store;

// Gateway
pub mod gateway;

// Cross-cutting concerns
pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;

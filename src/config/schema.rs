//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for all three
//! services. All types derive Serde traits for deserialization from TOML.

use serde::{Deserialize, Serialize};

/// Root configuration shared by produits, commandes and the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Produits microservice settings.
    pub produits: ServiceConfig,

    /// Commandes microservice settings.
    pub commandes: CommandesConfig,

    /// Gateway settings (bind address and upstream registry).
    pub gateway: GatewayConfig,

    /// Circuit breaker tuning for the gateway's `/cb/*` routes.
    pub circuit_breaker: CircuitBreakerConfig,

    /// Forwarder timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Settings common to a single service instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Bind address (e.g., "127.0.0.1:8081").
    pub bind_address: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8081".to_string(),
        }
    }
}

/// Commandes microservice settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CommandesConfig {
    /// Bind address (e.g., "127.0.0.1:8082").
    pub bind_address: String,

    /// Window, in days, for `GET /commandes/last`. Hot-reloadable.
    #[serde(alias = "commandes-last")]
    pub commandes_last: u32,
}

impl Default for CommandesConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8082".to_string(),
            commandes_last: 10,
        }
    }
}

/// Gateway settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Logical service name → instance addresses.
    pub upstreams: Vec<UpstreamConfig>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            upstreams: vec![
                UpstreamConfig {
                    service: "microservice-produits".to_string(),
                    addresses: vec!["127.0.0.1:8081".to_string()],
                },
                UpstreamConfig {
                    service: "microservice-commandes".to_string(),
                    addresses: vec!["127.0.0.1:8082".to_string()],
                },
            ],
        }
    }
}

/// One logical upstream and the instances behind it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Logical service name the gateway forwards to.
    pub service: String,

    /// Instance addresses rotated over by the resolver.
    pub addresses: Vec<String>,
}

/// Circuit breaker tuning.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CircuitBreakerConfig {
    /// Size of the trailing outcome window.
    pub window_size: usize,

    /// Minimum recorded calls before the failure rate is evaluated.
    pub min_samples: usize,

    /// Failure rate (0.0..=1.0) at or above which the circuit opens.
    pub failure_rate_threshold: f64,

    /// How long an open circuit waits before admitting trial calls, in
    /// milliseconds.
    pub open_wait_ms: u64,

    /// Number of trial calls admitted in half-open state.
    pub half_open_max_calls: u32,

    /// Trial success rate (0.0..=1.0) at or above which the circuit closes.
    pub half_open_success_threshold: f64,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            window_size: 10,
            min_samples: 5,
            failure_rate_threshold: 0.5,
            open_wait_ms: 10_000,
            half_open_max_calls: 3,
            half_open_success_threshold: 0.5,
        }
    }
}

/// Timeout configuration for the gateway forwarder.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time allowed for one forwarded request, in seconds.
    pub request_secs: u64,

    /// Inbound request timeout applied by the HTTP layer, in seconds.
    pub inbound_request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 5,
            inbound_request_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address. Must differ per service when several
    /// run on the same host.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check addresses parse, thresholds are in range, windows are non-zero
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before a config (initial or reloaded) is accepted

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid bind address for {service}: {address}")]
    InvalidBindAddress { service: &'static str, address: String },

    #[error("upstream {service} has no addresses")]
    EmptyUpstream { service: String },

    #[error("invalid address for upstream {service}: {address}")]
    InvalidUpstreamAddress { service: String, address: String },

    #[error("circuit_breaker.{field} must be greater than zero")]
    ZeroCircuitField { field: &'static str },

    #[error("circuit_breaker.min_samples ({min_samples}) exceeds window_size ({window_size})")]
    MinSamplesAboveWindow { min_samples: usize, window_size: usize },

    #[error("circuit_breaker.{field} must be within (0.0, 1.0], got {value}")]
    RateOutOfRange { field: &'static str, value: f64 },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (service, address) in [
        ("produits", &config.produits.bind_address),
        ("commandes", &config.commandes.bind_address),
        ("gateway", &config.gateway.bind_address),
    ] {
        if address.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidBindAddress {
                service,
                address: address.clone(),
            });
        }
    }

    for upstream in &config.gateway.upstreams {
        if upstream.addresses.is_empty() {
            errors.push(ValidationError::EmptyUpstream {
                service: upstream.service.clone(),
            });
        }
        for address in &upstream.addresses {
            if address.parse::<SocketAddr>().is_err() {
                errors.push(ValidationError::InvalidUpstreamAddress {
                    service: upstream.service.clone(),
                    address: address.clone(),
                });
            }
        }
    }

    let cb = &config.circuit_breaker;
    if cb.window_size == 0 {
        errors.push(ValidationError::ZeroCircuitField { field: "window_size" });
    }
    if cb.min_samples == 0 {
        errors.push(ValidationError::ZeroCircuitField { field: "min_samples" });
    }
    if cb.half_open_max_calls == 0 {
        errors.push(ValidationError::ZeroCircuitField {
            field: "half_open_max_calls",
        });
    }
    if cb.min_samples > cb.window_size {
        errors.push(ValidationError::MinSamplesAboveWindow {
            min_samples: cb.min_samples,
            window_size: cb.window_size,
        });
    }
    for (field, value) in [
        ("failure_rate_threshold", cb.failure_rate_threshold),
        ("half_open_success_threshold", cb.half_open_success_threshold),
    ] {
        if !(value > 0.0 && value <= 1.0) {
            errors.push(ValidationError::RateOutOfRange { field, value });
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

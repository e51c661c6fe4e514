//! Upstream resolution.
//!
//! # Responsibilities
//! - Map a logical service name to a live instance URL
//! - Rotate over configured instances (round-robin)
//!
//! # Design Decisions
//! - The gateway depends only on the [`UpstreamResolver`] contract; service
//!   discovery itself is assumed provided by the platform. The static
//!   resolver is the deployment used here and by the tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use url::Url;

use crate::config::UpstreamConfig;

/// Contract the forwarder calls through: logical name → base URL.
pub trait UpstreamResolver: Send + Sync + std::fmt::Debug {
    /// Resolve a logical service name, or `None` when unknown.
    fn resolve(&self, service: &str) -> Option<Url>;
}

/// Resolver over a fixed instance list from configuration.
#[derive(Debug)]
pub struct StaticResolver {
    services: HashMap<String, UpstreamGroup>,
}

#[derive(Debug)]
struct UpstreamGroup {
    instances: Vec<Url>,
    cursor: AtomicUsize,
}

impl StaticResolver {
    /// Build from the gateway's upstream configuration. Instances that do
    /// not parse as URLs are skipped with a warning.
    pub fn from_config(upstreams: &[UpstreamConfig]) -> Self {
        let mut services = HashMap::new();
        for upstream in upstreams {
            let instances: Vec<Url> = upstream
                .addresses
                .iter()
                .filter_map(|addr| match Url::parse(&format!("http://{addr}")) {
                    Ok(url) => Some(url),
                    Err(e) => {
                        tracing::warn!(service = %upstream.service, address = %addr, error = %e, "skipping invalid upstream address");
                        None
                    }
                })
                .collect();
            services.insert(
                upstream.service.clone(),
                UpstreamGroup {
                    instances,
                    cursor: AtomicUsize::new(0),
                },
            );
        }
        Self { services }
    }
}

impl UpstreamResolver for StaticResolver {
    fn resolve(&self, service: &str) -> Option<Url> {
        let group = self.services.get(service)?;
        if group.instances.is_empty() {
            return None;
        }
        let index = group.cursor.fetch_add(1, Ordering::Relaxed) % group.instances.len();
        Some(group.instances[index].clone())
    }
}

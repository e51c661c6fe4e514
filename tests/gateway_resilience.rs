//! Failure injection tests for the gateway's circuit breaker and fallback.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use comptoir::config::{AppConfig, CircuitBreakerConfig, SharedConfig, UpstreamConfig};
use comptoir::gateway::{self, CircuitRegistry, Forwarder, GatewayState, StaticResolver};

mod common;

/// Spawn a gateway whose two upstreams both point at `upstream`.
async fn spawn_gateway(upstream: SocketAddr, cb: CircuitBreakerConfig) -> SocketAddr {
    let mut config = AppConfig::default();
    config.circuit_breaker = cb;
    config.gateway.upstreams = vec![
        UpstreamConfig {
            service: "microservice-produits".to_string(),
            addresses: vec![upstream.to_string()],
        },
        UpstreamConfig {
            service: "microservice-commandes".to_string(),
            addresses: vec![upstream.to_string()],
        },
    ];

    let resolver = Arc::new(StaticResolver::from_config(&config.gateway.upstreams));
    let forwarder = Arc::new(Forwarder::new(resolver, Duration::from_secs(2)));
    let state = GatewayState {
        forwarder,
        circuits: Arc::new(CircuitRegistry::new(SharedConfig::new(config))),
    };
    common::spawn_service(gateway::handlers::router(state)).await
}

fn fast_circuit() -> CircuitBreakerConfig {
    CircuitBreakerConfig {
        window_size: 4,
        min_samples: 4,
        failure_rate_threshold: 0.5,
        open_wait_ms: 60_000,
        half_open_max_calls: 1,
        half_open_success_threshold: 1.0,
    }
}

#[tokio::test]
async fn test_fallback_routes_serve_static_payloads() {
    let upstream = common::unused_addr().await;
    let addr = spawn_gateway(upstream, CircuitBreakerConfig::default()).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("http://{addr}/fallback/produits"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Vec<Value> = res.json().await.unwrap();
    assert_eq!(body[0]["id"], -1);
    assert_eq!(body[0]["nom"], "Produit indisponible (fallback)");
    assert_eq!(body[0]["prix"], 0);

    let body: Vec<Value> = client
        .get(format!("http://{addr}/fallback/commandes"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body[0]["description"], "Commande indisponible (fallback)");
}

#[tokio::test]
async fn test_cb_route_returns_fallback_when_upstream_unreachable() {
    let upstream = common::unused_addr().await;
    let addr = spawn_gateway(upstream, CircuitBreakerConfig::default()).await;
    let client = reqwest::Client::new();

    // circuit still closed: the failure is recorded, the caller sees 200
    let res = client
        .get(format!("http://{addr}/cb/produits"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Vec<Value> = res.json().await.unwrap();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["id"], -1);
    assert_eq!(body[0]["nom"], "Produit indisponible (fallback)");
}

#[tokio::test]
async fn test_circuit_opens_and_stops_calling_upstream() {
    let hits = Arc::new(AtomicU32::new(0));
    let counter = hits.clone();
    let upstream = common::start_programmable_backend(move || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            (500, "boom".to_string())
        }
    })
    .await;

    let addr = spawn_gateway(upstream, fast_circuit()).await;
    let client = reqwest::Client::new();
    let url = format!("http://{addr}/cb/produits");

    // four failures fill the window and open the circuit
    for _ in 0..4 {
        let res = client.get(&url).send().await.unwrap();
        assert_eq!(res.status(), 200);
        let body: Vec<Value> = res.json().await.unwrap();
        assert_eq!(body[0]["id"], -1);
    }
    assert_eq!(hits.load(Ordering::SeqCst), 4);

    // open: fallback without any network attempt
    let res = client.get(&url).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let body: Vec<Value> = res.json().await.unwrap();
    assert_eq!(body[0]["id"], -1);
    assert_eq!(hits.load(Ordering::SeqCst), 4, "open circuit must not reach the upstream");
}

#[tokio::test]
async fn test_open_circuit_admits_trial_after_wait() {
    let healthy = Arc::new(AtomicBool::new(false));
    let hits = Arc::new(AtomicU32::new(0));
    let h = healthy.clone();
    let counter = hits.clone();
    let upstream = common::start_programmable_backend(move || {
        let h = h.clone();
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            if h.load(Ordering::SeqCst) {
                (200, r#"[{"id":1,"nom":"Clavier","prix":49.9}]"#.to_string())
            } else {
                (500, "boom".to_string())
            }
        }
    })
    .await;

    let mut cb = fast_circuit();
    cb.open_wait_ms = 200;
    let addr = spawn_gateway(upstream, cb).await;
    let client = reqwest::Client::new();
    let url = format!("http://{addr}/cb/produits");

    for _ in 0..4 {
        client.get(&url).send().await.unwrap();
    }
    assert_eq!(hits.load(Ordering::SeqCst), 4);

    // upstream recovers while the circuit is open
    healthy.store(true, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(400)).await;

    // next call is a trial that reaches the upstream and succeeds
    let res = client.get(&url).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let body: Vec<Value> = res.json().await.unwrap();
    assert_eq!(body[0]["nom"], "Clavier");
    assert_eq!(hits.load(Ordering::SeqCst), 5);

    // trial succeeded with half_open_max_calls = 1: circuit closed again
    let body: Vec<Value> = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(body[0]["nom"], "Clavier");
    assert_eq!(hits.load(Ordering::SeqCst), 6);
}

#[tokio::test]
async fn test_passthrough_surfaces_upstream_failure_as_502() {
    let upstream = common::unused_addr().await;
    let addr = spawn_gateway(upstream, CircuitBreakerConfig::default()).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("http://{addr}/produits"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 502);
}

#[tokio::test]
async fn test_passthrough_returns_upstream_body_verbatim() {
    let upstream =
        common::start_json_backend(r#"[{"id":1,"nom":"Clavier","prix":49.9}]"#).await;
    let addr = spawn_gateway(upstream, CircuitBreakerConfig::default()).await;
    let client = reqwest::Client::new();

    let body: Vec<Value> = client
        .get(format!("http://{addr}/commandes"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body[0]["id"], 1);
    assert_eq!(body[0]["nom"], "Clavier");
}

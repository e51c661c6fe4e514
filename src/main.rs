//! comptoir entrypoint.
//!
//! Runs one of the three services (`produits`, `commandes`, `gateway`)
//! selected by subcommand, all sharing the same configuration file.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use comptoir::commandes::{CommandeService, CommandesState};
use comptoir::config::loader::load_config;
use comptoir::config::watcher::ConfigWatcher;
use comptoir::config::{AppConfig, SharedConfig};
use comptoir::gateway::{CircuitRegistry, Forwarder, GatewayState, StaticResolver};
use comptoir::http;
use comptoir::lifecycle::Shutdown;
use comptoir::observability::metrics;
use comptoir::produits::ProduitService;
use comptoir::store::MemoryStore;
use comptoir::{commandes, gateway, produits};

#[derive(Parser)]
#[command(name = "comptoir")]
#[command(about = "Produits/commandes microservices and a resilient API gateway", long_about = None)]
struct Cli {
    /// Path to the shared TOML configuration file.
    #[arg(short, long, default_value = "comptoir.toml")]
    config: PathBuf,

    #[command(subcommand)]
    service: ServiceCommand,
}

#[derive(Subcommand)]
enum ServiceCommand {
    /// Run the produits CRUD microservice
    Produits,
    /// Run the commandes CRUD microservice
    Commandes,
    /// Run the API gateway (pass-through, circuit breaker, fallback)
    Gateway,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "comptoir=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = if cli.config.exists() {
        load_config(&cli.config)?
    } else {
        tracing::info!(path = ?cli.config, "no config file found, using built-in defaults");
        AppConfig::default()
    };

    let shared = SharedConfig::new(config);
    let snapshot = shared.snapshot();

    // Hot reload: the watcher handle must outlive the server.
    let _watcher = if cli.config.exists() {
        let (watcher, mut updates) = ConfigWatcher::new(&cli.config);
        let handle = watcher.run()?;
        let shared = shared.clone();
        tokio::spawn(async move {
            while let Some(new_config) = updates.recv().await {
                shared.replace(new_config);
                tracing::info!("configuration reloaded");
            }
        });
        Some(handle)
    } else {
        None
    };

    if snapshot.observability.metrics_enabled {
        match snapshot.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %snapshot.observability.metrics_address,
                "failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    match cli.service {
        ServiceCommand::Produits => {
            let service = Arc::new(ProduitService::new(Arc::new(MemoryStore::new())));
            let app = produits::handlers::router(service);
            let app = http::apply_layers(app, "produits", &snapshot);

            let listener = TcpListener::bind(&snapshot.produits.bind_address).await?;
            tracing::info!(bind_address = %snapshot.produits.bind_address, "microservice-produits starting");
            http::serve(app, listener, shutdown.subscribe()).await?;
        }
        ServiceCommand::Commandes => {
            let state = CommandesState {
                service: Arc::new(CommandeService::new(Arc::new(MemoryStore::new()))),
                config: shared.clone(),
            };
            let app = commandes::handlers::router(state);
            let app = http::apply_layers(app, "commandes", &snapshot);

            let listener = TcpListener::bind(&snapshot.commandes.bind_address).await?;
            tracing::info!(
                bind_address = %snapshot.commandes.bind_address,
                commandes_last = snapshot.commandes.commandes_last,
                "microservice-commandes starting"
            );
            http::serve(app, listener, shutdown.subscribe()).await?;
        }
        ServiceCommand::Gateway => {
            let resolver = Arc::new(StaticResolver::from_config(&snapshot.gateway.upstreams));
            let forwarder = Arc::new(Forwarder::new(
                resolver,
                Duration::from_secs(snapshot.timeouts.request_secs),
            ));
            let state = GatewayState {
                forwarder,
                circuits: Arc::new(CircuitRegistry::new(shared.clone())),
            };
            let app = gateway::handlers::router(state);
            let app = http::apply_layers(app, "gateway", &snapshot);

            let listener = TcpListener::bind(&snapshot.gateway.bind_address).await?;
            tracing::info!(
                bind_address = %snapshot.gateway.bind_address,
                upstreams = snapshot.gateway.upstreams.len(),
                "gateway starting"
            );
            http::serve(app, listener, shutdown.subscribe()).await?;
        }
    }

    tracing::info!("shutdown complete");
    Ok(())
}

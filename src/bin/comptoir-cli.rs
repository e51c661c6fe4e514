//! Management CLI for poking the running services through the gateway.

use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "comptoir-cli")]
#[command(about = "Query the comptoir gateway and microservices", long_about = None)]
struct Cli {
    /// Gateway base URL.
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List produits through the gateway pass-through
    Produits,
    /// List commandes through the gateway pass-through
    Commandes,
    /// Call a circuit-breaker guarded route (produits or commandes)
    Cb { resource: String },
    /// Show the static fallback payload for a resource
    Fallback { resource: String },
    /// Check gateway health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let path = match &cli.command {
        Commands::Produits => "/produits".to_string(),
        Commands::Commandes => "/commandes".to_string(),
        Commands::Cb { resource } => format!("/cb/{resource}"),
        Commands::Fallback { resource } => format!("/fallback/{resource}"),
        Commands::Health => "/health".to_string(),
    };

    let res = client.get(format!("{}{}", cli.url, path)).send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

//! News API Gateway
//!
//! An HTTP gateway built with Tokio and Axum, sitting in front of the
//! news, comments, and censor backend services.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌────────────────────────────────────────────┐
//!                        │                 GATEWAY                    │
//!                        │                                            │
//!   Client Request       │  ┌───────────┐   ┌──────────────────────┐ │
//!   ────────────────────▶│  │ middleware│──▶│       router         │ │
//!                        │  │ req-id +  │   │ proxy / aggregate /  │ │
//!                        │  │ logging   │   │ gated proxy          │ │
//!                        │  └───────────┘   └──────────┬───────────┘ │
//!                        │                             │             │
//!                        │                             ▼             │
//!   Client Response      │                  ┌──────────────────────┐ │      news
//!   ◀────────────────────┼──────────────────│   upstream client    │◀┼────▶ comments
//!                        │                  │  (fetch / forward)   │ │      censor
//!                        │                  └──────────────────────┘ │
//!                        └────────────────────────────────────────────┘
//! ```

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use news_gateway::config::loader::load_config;
use news_gateway::GatewayServer;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "news-gateway", about = "HTTP API gateway for the news platform")]
struct Args {
    /// Path to a TOML configuration file. Defaults plus environment
    /// overrides are used when omitted.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "news_gateway={},tower_http=warn",
                    config.observability.log_level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        bind_address = %config.listener.bind_address,
        news = %config.backends.news,
        comments = %config.backends.comments,
        censor = config.backends.censor.as_deref().unwrap_or("disabled"),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let server = GatewayServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

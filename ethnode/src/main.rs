use actix_web::{web, App, HttpServer};
use ethnode::{api, config::Config, service::NodeService, EthNode, RemoteNode};
use eyre::{eyre, Result};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

/// Application entry point
///
/// 1. Sets up logging
/// 2. Loads configuration
/// 3. Connects to the Ethereum node and detects its kind
/// 4. Starts the HTTP server exposing the normalized node interface
#[actix_web::main]
async fn main() -> Result<()> {
    // Configure logging: info for our service, lower levels for dependencies to reduce noise
    let filter = EnvFilter::from_default_env()
        .add_directive("ethnode=info".parse()?)
        .add_directive("actix_web=error".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Connect to the node and detect its kind, bounded by the dial timeout
    let node = tokio::time::timeout(config.dial_timeout(), RemoteNode::dial(&config.rpc_url))
        .await
        .map_err(|_| eyre!("timed out connecting to {}", config.rpc_url))??;
    info!(
        "Connected to {} node on {} at {}",
        node.kind(),
        node.user_agent().network(),
        config.rpc_url
    );

    let service = Arc::new(NodeService::new(node));

    // Create and start HTTP server
    HttpServer::new(move || {
        App::new()
            // Add logging middleware
            .wrap(TracingLogger::default())
            // Shared between requests
            .app_data(web::Data::new(service.clone()))
            .configure(api::configure)
    })
    // Set number of worker threads
    .workers(4)
    // Bind to host/port from configuration
    .bind((config.host.as_str(), config.port))?
    // Start the server
    .run()
    .await?;

    Ok(())
}

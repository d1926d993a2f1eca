use anyhow::Result;
use tracing::info;
use wealth_core::{config::Config, server, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // Initialize logging, tracing and metrics
    let prometheus_handle = telemetry::init(&config.telemetry);

    info!("Starting Wealth Core Service");
    info!(
        environment = %config.environment,
        "Binding HTTP server to {}",
        config.http_addr()
    );

    // Run the server
    server::run(config, prometheus_handle).await
}

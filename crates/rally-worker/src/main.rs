//! Rally worker entry point
//!
//! Run with:
//! ```bash
//! cargo run -p rally-worker
//! ```
//!
//! Configuration is loaded from environment variables.

use rally_common::{try_init_tracing, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize tracing
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {}", e);
    }

    // Run the worker
    if let Err(e) = run().await {
        error!(error = %e, "Worker failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Rally worker...");

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        feed_channel = %config.feed.channel,
        sweep_interval_secs = config.sweep.interval_secs,
        "Configuration loaded"
    );

    // Run the worker
    rally_worker::run(config).await?;

    Ok(())
}

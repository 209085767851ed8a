//! Fleet API server entry point
//!
//! Run with:
//! ```bash
//! API_PORT=8080 cargo run -p fleet-api
//! ```
//!
//! Configuration is loaded from environment variables and `.env`.

use fleet_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        eprintln!("fleet-api: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Load configuration first so the log format can follow APP_ENV
    let config = AppConfig::from_env()?;

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        port = config.api.port,
        database = config.database.is_some(),
        reconcile = config.reconcile.enabled,
        "Configuration loaded"
    );

    fleet_api::run(config).await?;

    Ok(())
}

//! Instance control service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request        ┌──────────────────────────────────────────────┐
//!     ──────────────────────┼─▶ http::server ─▶ http::handlers            │
//!                           │                        │                     │
//!                           │                        ▼                     │
//!                           │              resilience::timeouts            │
//!                           │                (deadline race)               │
//!                           │                        │                     │
//!                           │                        ▼                     │
//!     Client Response       │              provider::lightsail ───────────┼──▶ Cloud API
//!     ◀─────────────────────┼── http::response ◀─────┘                     │
//!                           │                                              │
//!                           │  config · observability · lifecycle          │
//!                           └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use instance_control::config;
use instance_control::lifecycle;
use instance_control::observability::init_logging;

#[derive(Parser)]
#[command(name = "instance-control")]
#[command(about = "HTTP control surface for a single cloud instance", version)]
struct Args {
    /// Optional TOML configuration file; environment variables override it.
    #[arg(short, long, env = "INSTANCE_CONTROL_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // A missing .env file is fine; the process environment may already be complete.
    dotenv::dotenv().ok();

    let config = match config::load(args.config.as_deref(), |k| std::env::var(k).ok()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("instance-control: {}", e);
            std::process::exit(2);
        }
    };

    init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        region = %config.provider.region,
        instance = %config.provider.instance_name,
        port = config.listener.port,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    lifecycle::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

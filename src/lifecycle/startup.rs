//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize the provider client from validated configuration
//! - Bind the listener and start serving
//! - Tie OS signals to graceful shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener binds last (traffic only when ready)

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ControlConfig;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::wait_for_signal;
use crate::provider::{InstanceProvider, LightsailProvider};

/// Errors that abort startup or serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Run the service until a termination signal arrives.
pub async fn run(config: ControlConfig) -> Result<(), StartupError> {
    let provider: Arc<dyn InstanceProvider> = Arc::new(LightsailProvider::new(&config.provider).await);

    let address = config.listener.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address: address.clone(), source })?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    HttpServer::new(config, provider)
        .run(listener, server_shutdown)
        .await?;
    Ok(())
}

//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the three control routes
//! - Wire up middleware (CORS, tracing, request ID)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use std::sync::Arc;

use axum::{
    body::Body,
    http::Request,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ControlConfig;
use crate::http::handlers::{instance_status, start_instance, stop_instance};
use crate::http::request::{RequestIdExt, RequestIdLayer};
use crate::provider::InstanceProvider;
use crate::resilience::TimeoutGuard;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn InstanceProvider>,
    pub instance_name: Arc<str>,
    pub guard: TimeoutGuard,
}

/// HTTP server for the instance control API.
pub struct HttpServer {
    router: Router,
    config: ControlConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and provider.
    pub fn new(config: ControlConfig, provider: Arc<dyn InstanceProvider>) -> Self {
        let state = AppState {
            provider,
            instance_name: Arc::from(config.provider.instance_name.as_str()),
            guard: TimeoutGuard::from_secs(config.timeouts.request_secs),
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/api/status", get(instance_status))
            .route("/api/stop", post(stop_instance))
            .route("/api/start", post(start_instance))
            .with_state(state)
            .layer(permissive_cors())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request.request_id_str(),
                )
            }))
            .layer(RequestIdLayer)
    }

    /// The fully layered router, for serving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            instance = %self.config.provider.instance_name,
            timeout_secs = self.config.timeouts.request_secs,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ControlConfig {
        &self.config
    }
}

/// Any origin, method and header.
fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

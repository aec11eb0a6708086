//! HTTP control surface for a single cloud instance.
//!
//! Three routes (`GET /api/status`, `POST /api/stop`, `POST /api/start`)
//! forward to the provider's instance API, each call bounded by a deadline.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod provider;
pub mod resilience;

pub use config::schema::ControlConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use provider::{InstanceProvider, InstanceSnapshot, ProviderError};

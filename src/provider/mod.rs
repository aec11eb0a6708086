//! Cloud provider boundary.
//!
//! # Data Flow
//! ```text
//! Route handler
//!     → resilience::timeouts (deadline race)
//!     → InstanceProvider (trait object)
//!     → lightsail.rs (AWS SDK call)
//! ```
//!
//! The trait exposes exactly the three capabilities the service needs so
//! handlers can run against a substitute implementation in tests.

pub mod lightsail;
pub mod types;

use async_trait::async_trait;

pub use lightsail::LightsailProvider;
pub use types::{InstanceSnapshot, ProviderError, ProviderResult};

/// Capability set of the remote instance-management API.
#[async_trait]
pub trait InstanceProvider: Send + Sync {
    /// Provider name used in logs (e.g., "lightsail").
    fn name(&self) -> &str;

    /// Look up the current state of an instance.
    async fn get_instance(&self, instance_name: &str) -> ProviderResult<InstanceSnapshot>;

    /// Request a start. Returns once the provider accepts the request.
    async fn start_instance(&self, instance_name: &str) -> ProviderResult<()>;

    /// Request a stop. Returns once the provider accepts the request.
    async fn stop_instance(&self, instance_name: &str) -> ProviderResult<()>;
}

//! Provider-facing types and error definitions.

use serde::Serialize;
use thiserror::Error;

/// Read-only projection of the remote instance, fetched fresh on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceSnapshot {
    /// Instance name as reported by the provider.
    pub name: String,
    /// Lifecycle state name (e.g., "running", "stopped", "pending").
    pub state: String,
    /// Public IPv4 address, absent while the instance is stopped.
    pub public_ip: Option<String>,
}

/// Errors that can occur while talking to the provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API call failed (credentials, unknown instance, invalid transition, network).
    #[error("provider API error: {0}")]
    Api(String),

    /// The call succeeded but the response lacked required fields.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

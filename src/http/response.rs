//! Response bodies and error mapping.
//!
//! # Responsibilities
//! - JSON shapes returned by the three routes
//! - Map guarded-call failures to HTTP status codes
//!
//! # Design Decisions
//! - Provider timeouts result in 504 Gateway Timeout
//! - Every other failure is a 500 with a fixed message; the cause only goes to the log

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::provider::InstanceSnapshot;

/// Body of `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Lifecycle state name.
    pub status: String,
    /// Public address; omitted while the instance has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    pub name: String,
}

impl From<InstanceSnapshot> for StatusResponse {
    fn from(snapshot: InstanceSnapshot) -> Self {
        Self {
            status: snapshot.state,
            ip: snapshot.public_ip,
            name: snapshot.name,
        }
    }
}

/// Body of a successful start/stop request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of every failure response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// The three operations exposed over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Status,
    Stop,
    Start,
}

impl Operation {
    pub fn label(self) -> &'static str {
        match self {
            Operation::Status => "status",
            Operation::Stop => "stop",
            Operation::Start => "start",
        }
    }

    /// Acknowledgment for a transition the provider accepted.
    pub fn success_message(self) -> &'static str {
        match self {
            Operation::Status => "Instance status retrieved",
            Operation::Stop => "Server stop initiated successfully",
            Operation::Start => "Server start initiated successfully",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Status => "Failed to get instance status",
            Operation::Stop => "Failed to stop instance",
            Operation::Start => "Failed to start instance",
        }
    }
}

/// Errors returned by route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request timed out after {} seconds", .0.as_secs())]
    Timeout(Duration),

    #[error("{} operation failed", .0.label())]
    Failed(Operation),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            ApiError::Timeout(limit) => {
                format!("Request timed out after {} seconds", limit.as_secs())
            }
            ApiError::Failed(op) => op.failure_message().to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.public_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_body_omits_missing_address() {
        let body = StatusResponse::from(InstanceSnapshot {
            name: "web-1".into(),
            state: "stopped".into(),
            public_ip: None,
        });
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "stopped", "name": "web-1" }));
    }

    #[test]
    fn timeout_maps_to_504_with_duration() {
        let err = ApiError::Timeout(Duration::from_secs(15));
        assert_eq!(err.status_code(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(err.public_message(), "Request timed out after 15 seconds");
    }

    #[test]
    fn failures_map_to_500_with_fixed_messages() {
        for (op, msg) in [
            (Operation::Status, "Failed to get instance status"),
            (Operation::Stop, "Failed to stop instance"),
            (Operation::Start, "Failed to start instance"),
        ] {
            let err = ApiError::Failed(op);
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(err.public_message(), msg);
        }
    }
}

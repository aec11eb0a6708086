//! Route handlers for the instance control API.
//!
//! Each handler issues one provider call through the [`TimeoutGuard`]
//! and maps the outcome to a response. No state is kept between requests.
//!
//! [`TimeoutGuard`]: crate::resilience::TimeoutGuard

use std::future::Future;
use std::sync::Arc;

use axum::{extract::State, Json};

use crate::http::response::{ApiError, MessageResponse, Operation, StatusResponse};
use crate::http::server::AppState;
use crate::provider::{InstanceProvider, ProviderError, ProviderResult};
use crate::resilience::GuardError;

/// `GET /api/status`
pub async fn instance_status(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, ApiError> {
    let snapshot = guarded(&state, Operation::Status, |provider, name| async move {
        provider.get_instance(&name).await
    })
    .await?;

    tracing::debug!(
        instance = %snapshot.name,
        state = %snapshot.state,
        "Instance status retrieved"
    );
    Ok(Json(snapshot.into()))
}

/// `POST /api/stop`
pub async fn stop_instance(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    guarded(&state, Operation::Stop, |provider, name| async move {
        provider.stop_instance(&name).await
    })
    .await?;

    Ok(acknowledge(&state, Operation::Stop))
}

/// `POST /api/start`
pub async fn start_instance(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    guarded(&state, Operation::Start, |provider, name| async move {
        provider.start_instance(&name).await
    })
    .await?;

    Ok(acknowledge(&state, Operation::Start))
}

fn acknowledge(state: &AppState, op: Operation) -> Json<MessageResponse> {
    tracing::info!(
        instance = %state.instance_name,
        operation = op.label(),
        "{}",
        op.success_message()
    );
    Json(MessageResponse {
        message: op.success_message().to_string(),
    })
}

/// Run one provider call under the deadline and translate its failure.
async fn guarded<T, F, Fut>(state: &AppState, op: Operation, call: F) -> Result<T, ApiError>
where
    F: FnOnce(Arc<dyn InstanceProvider>, Arc<str>) -> Fut,
    Fut: Future<Output = ProviderResult<T>> + Send + 'static,
    T: Send + 'static,
{
    tracing::debug!(
        instance = %state.instance_name,
        operation = op.label(),
        provider = state.provider.name(),
        "Dispatching provider call"
    );

    let fut = call(state.provider.clone(), state.instance_name.clone());
    state
        .guard
        .run(op.label(), fut)
        .await
        .map_err(|e| reject(state, op, e))
}

fn reject(state: &AppState, op: Operation, err: GuardError<ProviderError>) -> ApiError {
    match err {
        GuardError::Timeout(limit) => {
            tracing::warn!(
                instance = %state.instance_name,
                operation = op.label(),
                timeout_secs = limit.as_secs(),
                "Provider call timed out; remote outcome unknown"
            );
            ApiError::Timeout(limit)
        }
        other => {
            tracing::error!(
                instance = %state.instance_name,
                operation = op.label(),
                error = %other,
                "Provider call failed"
            );
            ApiError::Failed(op)
        }
    }
}

//! Timeout enforcement for provider calls.
//!
//! # Responsibilities
//! - Race a single provider call against a fixed deadline
//! - Keep timeout errors distinct from operation errors
//! - Leave a timed-out call running and log how it eventually ends
//!
//! # Design Decisions
//! - The call runs in its own task; losing the race detaches it, it is not aborted.
//!   A remote start/stop may still take effect after the caller saw a timeout,
//!   so a timeout means "outcome unknown".
//! - Timed-out requests map to 504 Gateway Timeout in the HTTP layer

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;

/// Outcome of a guarded call that did not succeed.
#[derive(Debug, Error)]
pub enum GuardError<E> {
    /// The deadline elapsed before the call settled.
    #[error("timed out after {} seconds", .0.as_secs())]
    Timeout(Duration),

    /// The call itself failed.
    #[error("{0}")]
    Operation(E),

    /// The task running the call panicked or was cancelled by the runtime.
    #[error("operation task aborted: {0}")]
    Aborted(String),
}

impl<E> GuardError<E> {
    pub fn is_timeout(&self) -> bool {
        matches!(self, GuardError::Timeout(_))
    }
}

/// Races operations against a fixed deadline.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutGuard {
    limit: Duration,
}

impl TimeoutGuard {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    /// The configured deadline.
    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Run `op` to completion or until the deadline, whichever comes first.
    ///
    /// `label` names the operation in log lines about late completions.
    pub async fn run<F, T, E>(&self, label: &'static str, op: F) -> Result<T, GuardError<E>>
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Display + Send + 'static,
    {
        let mut task = tokio::spawn(op);

        tokio::select! {
            joined = &mut task => match joined {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(e)) => Err(GuardError::Operation(e)),
                Err(join_err) => Err(GuardError::Aborted(join_err.to_string())),
            },
            _ = tokio::time::sleep(self.limit) => {
                tracing::warn!(
                    operation = label,
                    timeout_secs = self.limit.as_secs(),
                    "Operation exceeded deadline; leaving it to finish in the background"
                );
                watch_detached(label, task);
                Err(GuardError::Timeout(self.limit))
            }
        }
    }
}

/// Log the eventual result of a call whose caller already gave up on it.
fn watch_detached<T, E>(label: &'static str, task: JoinHandle<Result<T, E>>)
where
    T: Send + 'static,
    E: Display + Send + 'static,
{
    tokio::spawn(async move {
        match task.await {
            Ok(Ok(_)) => tracing::info!(operation = label, "Timed-out operation completed late"),
            Ok(Err(e)) => tracing::warn!(operation = label, error = %e, "Timed-out operation failed late"),
            Err(e) => tracing::warn!(operation = label, error = %e, "Timed-out operation task aborted"),
        }
    });
}

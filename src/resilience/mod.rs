//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to provider:
//!     → timeouts.rs (race the call against the configured deadline)
//!     → On timeout: 504, call left running and its late outcome logged
//! ```
//!
//! # Design Decisions
//! - Every provider call has a deadline
//! - No retries: start/stop are not idempotent from the caller's view,
//!   and a timed-out call may still be in flight

pub mod timeouts;

pub use timeouts::{GuardError, TimeoutGuard};

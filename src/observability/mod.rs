//! Observability subsystem.
//!
//! Logging only: every subsystem emits `tracing` events with structured
//! fields (`instance`, `operation`, `request_id`), and `logging.rs`
//! installs the subscriber that writes them to stdout.

pub mod logging;

pub use logging::init_logging;

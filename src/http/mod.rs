//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, CORS, tracing)
//!     → request.rs (add request ID)
//!     → handlers.rs (one guarded provider call)
//!     → response.rs (JSON body, status mapping)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, RequestIdLayer, X_REQUEST_ID};
pub use response::{ApiError, ErrorBody, MessageResponse, Operation, StatusResponse};
pub use server::{AppState, HttpServer};

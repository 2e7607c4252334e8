//! HTTP API subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (router, middleware stack, graceful shutdown)
//!     → request.rs (request ID)
//!     → handlers.rs (address, portfolio, send, health)
//!     → response.rs (error → status + JSON body)
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{AppState, HttpServer};

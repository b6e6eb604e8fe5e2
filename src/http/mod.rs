//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, route table, app state)
//!     → middleware/ (request id, logging, moderation gate)
//!     → proxy.rs (passthrough routes) or aggregate.rs (fan-out route)
//!     → Send to client
//! ```

pub mod aggregate;
pub mod middleware;
pub mod proxy;
pub mod server;

pub use middleware::request_id::{RequestContext, RequestIdLayer, REQUEST_ID_PARAM};
pub use server::{AppState, BackendUrls, GatewayServer};

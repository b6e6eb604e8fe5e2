//! News API Gateway Library
//!
//! An HTTP gateway in front of independent news, comments, and censor
//! backend services. Clients see one unified API; the gateway routes,
//! proxies, validates, and aggregates across the backends.

pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod upstream;

pub use config::schema::GatewayConfig;
pub use error::GatewayError;
pub use http::GatewayServer;

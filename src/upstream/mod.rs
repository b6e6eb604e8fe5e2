//! Outbound backend access subsystem.
//!
//! # Data Flow
//! ```text
//! Handler needs backend data
//!     → url.rs (compose request URL from base + path + query)
//!     → client.rs (issue request, enforce timeout, decode JSON)
//!     → Return: typed result or GatewayError
//! ```
//!
//! # Design Decisions
//! - One shared pooled HTTP client for all backends
//! - Per-call timeout from config; no retries at this layer
//! - URL composition is pure: inputs are never mutated

pub mod client;
pub mod url;

pub use client::UpstreamClient;
pub use url::{compose, compose_url};

//! Middleware chain around every route.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → request_id.rs (assign correlation id, build RequestContext)
//!     → logging.rs (request received / response sent records)
//!     → [route handler; moderation.rs wraps the write routes]
//! ```
//!
//! # Design Decisions
//! - Correlation id lives in a request-scoped context object, never in
//!   process-wide state
//! - The moderation gate buffers the body once and hands downstream a
//!   fresh copy, so handlers see the original bytes intact

pub mod logging;
pub mod moderation;
pub mod request_id;

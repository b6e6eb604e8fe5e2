//! Gateway error taxonomy.
//!
//! # Responsibilities
//! - One error type for every failure the gateway surfaces to clients
//! - Map each failure class to an HTTP status
//! - Keep messages short and human-readable
//!
//! # Design Decisions
//! - Client-input problems and moderation rejections are 400s
//! - Upstream transport/decode failures surface as 500s (the backend,
//!   not the client, is at fault)
//! - Proxy misconfiguration / unreachable proxy target is a 502
//! - No retries at this layer; errors propagate immediately

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Every error the gateway can return to a client.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Missing or malformed client input (id, page, body).
    #[error("{0}")]
    BadRequest(String),

    /// The censor backend rejected the submitted content.
    #[error("rejected content")]
    ModerationRejected,

    /// A backend could not be reached (connect failure or timeout).
    #[error("upstream request to {url} failed: {reason}")]
    UpstreamTransport { url: String, reason: String },

    /// A backend answered with malformed or unexpected JSON.
    #[error("upstream response from {url} malformed: {reason}")]
    UpstreamDecode { url: String, reason: String },

    /// The proxy target is misconfigured or unreachable.
    #[error("{0}")]
    BadGateway(String),
}

impl GatewayError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::BadRequest(_) | GatewayError::ModerationRejected => StatusCode::BAD_REQUEST,
            GatewayError::UpstreamTransport { .. } | GatewayError::UpstreamDecode { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            GatewayError::BadGateway(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        tracing::debug!(
            status = %status,
            error = %message,
            "Request failed"
        );

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            GatewayError::BadRequest("id expected".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(GatewayError::ModerationRejected.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            GatewayError::UpstreamTransport {
                url: "http://news".into(),
                reason: "connection refused".into()
            }
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GatewayError::BadGateway("bad target".into()).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_moderation_message_is_fixed() {
        assert_eq!(GatewayError::ModerationRejected.to_string(), "rejected content");
    }
}

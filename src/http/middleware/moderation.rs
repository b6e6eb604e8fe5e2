//! Moderation gate around write routes.
//!
//! # Responsibilities
//! - Buffer the request body (bounded) and restore it for downstream
//! - POST the original bytes to the censor backend for validation
//! - Reject with 400 before the downstream handler runs when the censor
//!   says no, or cannot be reached (fail closed)
//!
//! # Design Decisions
//! - The body is read once into an owned buffer; downstream receives a
//!   fresh view of the identical bytes
//! - A censor transport failure rejects the request rather than surfacing
//!   a 5xx, matching the upstream service contract

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::GatewayError;
use crate::http::server::AppState;
use crate::upstream::compose_url;

/// Censor endpoint receiving candidate content.
const VALIDATE_PATH: &str = "/comments/validate";

/// Gate a write request behind the censor backend.
pub async fn moderation_gate(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match validate(&state, req).await {
        Ok(req) => next.run(req).await,
        Err(e) => e.into_response(),
    }
}

/// Run the censor check, returning the request with its body restored.
async fn validate(state: &AppState, req: Request) -> Result<Request, GatewayError> {
    let censor = state
        .urls
        .censor
        .as_ref()
        .ok_or_else(|| GatewayError::BadGateway("censor backend not configured".to_string()))?;

    let (parts, body) = req.into_parts();

    let bytes = to_bytes(body, state.max_body_bytes)
        .await
        .map_err(|e| GatewayError::BadRequest(e.to_string()))?;

    let validate_url = compose_url(censor, VALIDATE_PATH, &[]);

    // Fail closed: an unreachable censor rejects the request.
    let status = state
        .client
        .post_bytes(&validate_url, bytes.clone())
        .await
        .map_err(|e| GatewayError::BadRequest(e.to_string()))?;

    if !status.is_success() {
        return Err(GatewayError::ModerationRejected);
    }

    Ok(Request::from_parts(parts, Body::from(bytes)))
}

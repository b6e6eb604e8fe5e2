//! Request lifecycle logging.
//!
//! # Responsibilities
//! - Emit one "request received" record before the inner handler runs
//! - Emit one "response sent" record with the final status after it returns
//! - Key both records by the correlation id
//!
//! # Design Decisions
//! - Logs every request/response pair regardless of outcome, so operators
//!   can reconstruct failure timelines from the correlation id alone

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::http::middleware::request_id::RequestContext;

/// Log the lifecycle of one request.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let (request_id, remote_addr) = match req.extensions().get::<RequestContext>() {
        Some(ctx) => (ctx.request_id.clone(), ctx.remote_display()),
        None => ("-".to_string(), "-".to_string()),
    };

    tracing::info!(
        request_id = %request_id,
        remote_addr = %remote_addr,
        method = %req.method(),
        path = %req.uri().path(),
        "Request received"
    );

    let response = next.run(req).await;

    tracing::info!(
        request_id = %request_id,
        status = %response.status(),
        "Response sent"
    );

    response
}

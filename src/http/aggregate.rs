//! Fan-out aggregation of news detail and its comments.
//!
//! # Responsibilities
//! - Fetch the full article and its comment thread concurrently
//! - Join both results; either failure fails the whole request
//! - Merge into one response entity, never a partial one
//!
//! # Design Decisions
//! - `tokio::join!` gives each fetch its own result slot and resumes the
//!   handler only after both complete; no shared mutable state
//! - The correlation id is forwarded to both sub-calls as a query
//!   parameter, so one aggregation is traceable end to end
//! - Both sub-calls are independent reads; no ordering between them

use axum::extract::{Path, State};
use axum::{Extension, Json};

use crate::error::GatewayError;
use crate::http::middleware::request_id::RequestContext;
use crate::http::server::AppState;
use crate::models::{CommentsPayload, FullNews, FullNewsWithComments};
use crate::upstream::compose_url;

/// Handler for `GET /news/{id}`: article detail plus its comment thread.
pub async fn news_details(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Json<FullNewsWithComments>, GatewayError> {
    let request_id = ctx.request_id;
    let id_str = id.to_string();

    let news_url = compose_url(
        &state.urls.news,
        &format!("/news/{id}"),
        &[("request_id", request_id.as_str())],
    );
    let comments_url = compose_url(
        &state.urls.comments,
        "/comments",
        &[("news_id", id_str.as_str()), ("request_id", request_id.as_str())],
    );

    let (news, comments) = tokio::join!(
        state.client.get_json::<FullNews>(&news_url),
        state.client.get_json::<CommentsPayload>(&comments_url),
    );

    // Either failure discards the other result; no partial aggregate.
    let news = news?;
    let comments = comments?.normalize();

    Ok(Json(FullNewsWithComments::from_parts(news, comments)))
}

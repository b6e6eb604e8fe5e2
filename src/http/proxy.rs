//! Reverse proxy passthrough.
//!
//! # Responsibilities
//! - Forward an inbound request verbatim to a backend base URL
//! - Rewrite scheme, authority, and Host header to the backend's
//! - Stream the backend response back without buffering the body
//!
//! # Design Decisions
//! - Path and query pass through unmodified (a base path prefix, if any,
//!   is joined in front)
//! - Unreachable or misconfigured targets surface as 502, with no retry

use axum::body::Body;
use axum::http::uri::{Authority, Scheme};
use axum::http::{header, HeaderValue, Request, Uri};
use axum::response::Response;
use url::Url;

use crate::error::GatewayError;
use crate::upstream::UpstreamClient;

/// Forward `req` to the backend at `base`, relaying the streamed response.
pub async fn forward(
    req: Request<Body>,
    base: &Url,
    client: &UpstreamClient,
) -> Result<Response, GatewayError> {
    let scheme = Scheme::try_from(base.scheme())
        .map_err(|_| GatewayError::BadGateway(format!("unsupported scheme in {base}")))?;
    let authority = authority_of(base)?;

    let (mut parts, body) = req.into_parts();

    let mut uri_parts = parts.uri.into_parts();
    uri_parts.scheme = Some(scheme);
    uri_parts.authority = Some(authority.clone());
    uri_parts.path_and_query = Some(
        joined_path_and_query(base, uri_parts.path_and_query.as_ref())
            .parse()
            .map_err(|e| GatewayError::BadGateway(format!("rewriting path for {base}: {e}")))?,
    );

    parts.uri = Uri::from_parts(uri_parts)
        .map_err(|e| GatewayError::BadGateway(format!("rewriting URI for {base}: {e}")))?;

    // The inbound Host header names this gateway; the backend expects its own.
    parts.headers.insert(
        header::HOST,
        HeaderValue::from_str(authority.as_str())
            .map_err(|e| GatewayError::BadGateway(format!("host header for {base}: {e}")))?,
    );

    let outbound = Request::from_parts(parts, body);

    let response = match client.request(outbound).await {
        Ok(response) => response,
        Err(GatewayError::UpstreamTransport { url, reason }) => {
            return Err(GatewayError::BadGateway(format!(
                "upstream {url} unreachable: {reason}"
            )));
        }
        Err(e) => return Err(e),
    };

    let (parts, body) = response.into_parts();
    Ok(Response::from_parts(parts, Body::new(body)))
}

/// Authority (host[:port]) of a backend base URL.
fn authority_of(base: &Url) -> Result<Authority, GatewayError> {
    let host = base
        .host_str()
        .ok_or_else(|| GatewayError::BadGateway(format!("base URL {base} has no host")))?;

    let authority = match base.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };

    Authority::try_from(authority.as_str())
        .map_err(|e| GatewayError::BadGateway(format!("invalid authority {authority:?}: {e}")))
}

/// Join the base URL's path prefix (if any) in front of the inbound
/// path-and-query.
fn joined_path_and_query(base: &Url, inbound: Option<&axum::http::uri::PathAndQuery>) -> String {
    let prefix = base.path().trim_end_matches('/');
    match inbound {
        Some(pq) if prefix.is_empty() => pq.as_str().to_string(),
        Some(pq) => format!("{prefix}{}", pq.as_str()),
        None if prefix.is_empty() => "/".to_string(),
        None => prefix.to_string(),
    }
}

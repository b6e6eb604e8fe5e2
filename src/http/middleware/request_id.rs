//! Correlation id assignment.
//!
//! # Responsibilities
//! - Read the correlation id from the `request_id` query parameter
//! - Generate a UUID v4 when the parameter is absent and rewrite the
//!   request URI to carry it, so proxied backends receive the same id
//! - Attach a request-scoped `RequestContext` to the request extensions
//!
//! # Design Decisions
//! - Runs outermost so every later stage (logging included) sees the id
//! - The context is read-only after this layer; later stages only read it

use std::net::SocketAddr;
use std::task::{Context, Poll};
use std::time::SystemTime;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, Uri};
use tower::{Layer, Service};
use uuid::Uuid;

/// Query parameter carrying the correlation id.
pub const REQUEST_ID_PARAM: &str = "request_id";

/// Request-scoped context, immutable after the request-id layer sets it.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Correlation id, unique per inbound request.
    pub request_id: String,

    /// Remote peer address, when the server was set up with connect info.
    pub remote_addr: Option<SocketAddr>,

    /// Arrival time of the request.
    pub received_at: SystemTime,
}

impl RequestContext {
    /// Remote address for log records; "-" when unknown.
    pub fn remote_display(&self) -> String {
        self.remote_addr
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Layer installing [`RequestIdService`].
#[derive(Debug, Clone, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service assigning a correlation id to every request.
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestIdService<S>
where
    S: Service<Request<Body>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let request_id = match existing_request_id(req.uri()) {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4().to_string();
                if let Some(uri) = with_request_id(req.uri(), &id) {
                    *req.uri_mut() = uri;
                }
                id
            }
        };

        let remote_addr = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0);

        req.extensions_mut().insert(RequestContext {
            request_id,
            remote_addr,
            received_at: SystemTime::now(),
        });

        self.inner.call(req)
    }
}

/// Extract a non-empty correlation id from the URI query, if present.
fn existing_request_id(uri: &Uri) -> Option<String> {
    let query = uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == REQUEST_ID_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Rebuild the URI with the correlation id appended to its query.
fn with_request_id(uri: &Uri, id: &str) -> Option<Uri> {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    if let Some(query) = uri.query() {
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            serializer.append_pair(&key, &value);
        }
    }
    serializer.append_pair(REQUEST_ID_PARAM, id);
    let query = serializer.finish();

    let path_and_query = format!("{}?{}", uri.path(), query).parse().ok()?;

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query);
    Uri::from_parts(parts).ok()
}

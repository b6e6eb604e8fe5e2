//! Outbound HTTP client for backend calls.
//!
//! # Responsibilities
//! - Issue GET requests and decode JSON responses into typed results
//! - Issue POST requests with raw bytes (moderation checks)
//! - Forward raw requests for the reverse proxy path
//! - Enforce the configured per-call timeout
//!
//! # Design Decisions
//! - Transport failures and decode failures are distinct error variants
//! - A non-2xx upstream status counts as a decode failure: the caller asked
//!   for a typed JSON body and did not get one
//! - No retries: one failed call fails the caller immediately

use std::time::Duration;

use axum::body::{to_bytes, Body, Bytes};
use axum::http::{header, Method, Request, StatusCode};
use hyper::body::Incoming;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{LimitsConfig, TimeoutConfig};
use crate::error::GatewayError;

/// Shared HTTP client for all outbound backend calls.
#[derive(Clone)]
pub struct UpstreamClient {
    http: Client<HttpConnector, Body>,
    timeout: Duration,
    max_body_bytes: usize,
}

impl UpstreamClient {
    /// Create a client with the configured timeout and body limit.
    pub fn new(timeouts: &TimeoutConfig, limits: &LimitsConfig) -> Self {
        let timeout = Duration::from_secs(timeouts.upstream_secs);

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(timeout));

        let http = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            http,
            timeout,
            max_body_bytes: limits.max_body_bytes,
        }
    }

    /// Send a fully-formed request to a backend, enforcing the call timeout.
    ///
    /// The response body is returned unconsumed so the proxy path can
    /// stream it through without buffering.
    pub async fn request(
        &self,
        req: Request<Body>,
    ) -> Result<axum::http::Response<Incoming>, GatewayError> {
        let url = req.uri().to_string();

        match tokio::time::timeout(self.timeout, self.http.request(req)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => Err(GatewayError::UpstreamTransport {
                url,
                reason: e.to_string(),
            }),
            Err(_) => Err(GatewayError::UpstreamTransport {
                url,
                reason: format!("timed out after {:?}", self.timeout),
            }),
        }
    }

    /// GET a backend URL and decode the JSON body into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, GatewayError> {
        let req = Request::builder()
            .method(Method::GET)
            .uri(url.as_str())
            .header(header::ACCEPT, "application/json")
            .body(Body::empty())
            .map_err(|e| GatewayError::BadGateway(format!("building request for {url}: {e}")))?;

        let response = self.request(req).await?;
        let status = response.status();

        let bytes = to_bytes(Body::new(response.into_body()), self.max_body_bytes)
            .await
            .map_err(|e| GatewayError::UpstreamTransport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        if !status.is_success() {
            return Err(GatewayError::UpstreamDecode {
                url: url.to_string(),
                reason: format!("unexpected status {status}"),
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| GatewayError::UpstreamDecode {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    /// POST raw bytes to a backend URL and return the response status.
    pub async fn post_bytes(&self, url: &Url, body: Bytes) -> Result<StatusCode, GatewayError> {
        let req = Request::builder()
            .method(Method::POST)
            .uri(url.as_str())
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .map_err(|e| GatewayError::BadGateway(format!("building request for {url}: {e}")))?;

        let response = self.request(req).await?;
        Ok(response.status())
    }
}

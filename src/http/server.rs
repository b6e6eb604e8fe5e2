//! HTTP server setup and route table.
//!
//! # Responsibilities
//! - Parse backend base URLs into the immutable endpoint set
//! - Build the Axum router: proxy, aggregate, and gated-proxy routes
//! - Wire up the middleware chain (request id → logging → timeout → trace)
//! - Bind and serve with graceful shutdown
//!
//! # Design Decisions
//! - Route table is fixed at startup; backend URLs never change afterwards
//! - The moderation gate is installed only when a censor URL is configured
//! - One shared outbound client across all handlers

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Request, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use url::Url;

use crate::config::{BackendsConfig, GatewayConfig};
use crate::error::GatewayError;
use crate::http::aggregate::news_details;
use crate::http::middleware::logging::log_requests;
use crate::http::middleware::moderation::moderation_gate;
use crate::http::middleware::request_id::RequestIdLayer;
use crate::http::proxy;
use crate::upstream::UpstreamClient;

/// Backend endpoint set, read-only after startup.
#[derive(Debug, Clone)]
pub struct BackendUrls {
    pub news: Url,
    pub comments: Url,
    pub censor: Option<Url>,
}

impl BackendUrls {
    /// Parse the configured base URL strings. Validation has already run,
    /// so failures here indicate a config bypass and surface as 502-class
    /// setup errors.
    pub fn from_config(config: &BackendsConfig) -> Result<Self, GatewayError> {
        let parse = |name: &str, raw: &str| {
            Url::parse(raw)
                .map_err(|e| GatewayError::BadGateway(format!("backend {name} URL {raw:?}: {e}")))
        };

        Ok(Self {
            news: parse("news", &config.news)?,
            comments: parse("comments", &config.comments)?,
            censor: config
                .censor
                .as_deref()
                .map(|raw| parse("censor", raw))
                .transpose()?,
        })
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub urls: Arc<BackendUrls>,
    pub client: UpstreamClient,
    pub max_body_bytes: usize,
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
}

impl GatewayServer {
    /// Create a new server from a validated configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let urls = Arc::new(BackendUrls::from_config(&config.backends)?);
        let client = UpstreamClient::new(&config.timeouts, &config.limits);

        let state = AppState {
            urls,
            client,
            max_body_bytes: config.limits.max_body_bytes,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let mut comment_routes = Router::new().route("/comments", post(proxy_comments));
        if state.urls.censor.is_some() {
            comment_routes = comment_routes
                .route_layer(middleware::from_fn_with_state(state.clone(), moderation_gate));
        }

        Router::new()
            .route("/news/latest", get(proxy_news))
            .route("/news/filtered", get(proxy_news))
            .route("/news/{id}", get(news_details))
            .merge(comment_routes)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(middleware::from_fn(log_requests))
            .layer(RequestIdLayer)
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Clone of the assembled router, for in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Passthrough routes to the news backend.
async fn proxy_news(State(state): State<AppState>, req: Request) -> Result<Response, GatewayError> {
    proxy::forward(req, &state.urls.news, &state.client).await
}

/// Passthrough route to the comments backend (moderation gate runs first
/// when configured).
async fn proxy_comments(
    State(state): State<AppState>,
    req: Request,
) -> Result<Response, GatewayError> {
    proxy::forward(req, &state.urls.comments, &state.client).await
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}

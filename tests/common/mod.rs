//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;

use news_gateway::{GatewayConfig, GatewayServer};

/// One request observed by a mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub uri: String,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// Value of a query parameter, if present.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let (_, query) = self.uri.split_once('?')?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    pub fn path(&self) -> &str {
        self.uri.split('?').next().unwrap_or(&self.uri)
    }
}

pub type RequestLog = Arc<Mutex<Vec<RecordedRequest>>>;

#[derive(Clone)]
struct MockBackend {
    log: RequestLog,
    status: StatusCode,
    body: String,
}

async fn record_handler(State(backend): State<MockBackend>, req: Request) -> Response {
    let (parts, body) = req.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap();

    backend.log.lock().unwrap().push(RecordedRequest {
        method: parts.method.to_string(),
        uri: parts.uri.to_string(),
        body: bytes.to_vec(),
    });

    Response::builder()
        .status(backend.status)
        .header("content-type", "application/json")
        .header("x-mock-backend", "1")
        .body(Body::from(backend.body))
        .unwrap()
}

/// Start a mock backend that records every request and answers each with
/// the given status and body. Returns its address and the request log.
pub async fn spawn_backend(status: u16, body: &str) -> (SocketAddr, RequestLog) {
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let backend = MockBackend {
        log: log.clone(),
        status: StatusCode::from_u16(status).unwrap(),
        body: body.to_string(),
    };

    let router = Router::new().fallback(record_handler).with_state(backend);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (addr, log)
}

/// Start the gateway on an ephemeral port with the given configuration.
pub async fn spawn_gateway(config: GatewayConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = GatewayServer::new(config).expect("gateway construction failed");
    tokio::spawn(async move {
        server.run(listener).await.unwrap();
    });

    addr
}

/// An address nothing listens on (bound once, then released).
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Gateway configuration pointing at the given backends.
pub fn gateway_config(
    news: SocketAddr,
    comments: SocketAddr,
    censor: Option<SocketAddr>,
) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.backends.news = format!("http://{news}");
    config.backends.comments = format!("http://{comments}");
    config.backends.censor = censor.map(|addr| format!("http://{addr}"));
    // Keep failing transport calls quick.
    config.timeouts.upstream_secs = 2;
    config
}

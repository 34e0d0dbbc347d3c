//! Shared test fixtures
//!
//! `MockBackend` is an in-process HTTP server standing in for the PropAI
//! backend. It runs on its own thread and runtime so both `#[test]` and
//! `#[tokio::test]` tests can use it, and it records every request it receives.

use crate::api::ApiClient;
use crate::storage::{demo_properties, PortfolioFile};
use crate::store::PropertyStore;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// One request as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Raw (still percent-encoded) path
    pub path: String,
    pub body: String,
}

impl RecordedRequest {
    /// Body parsed as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is not JSON")
    }
}

/// Canned response for one route
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    pub delay: Duration,
}

impl MockResponse {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Default)]
struct Shared {
    routes: Mutex<HashMap<String, MockResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// In-process backend double
pub struct MockBackend {
    addr: SocketAddr,
    shared: Arc<Shared>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockBackend {
    /// Bind to an ephemeral loopback port and start serving
    pub fn start() -> Self {
        let shared = Arc::new(Shared::default());
        let (addr_tx, addr_rx) = std::sync::mpsc::channel();
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let server_shared = shared.clone();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to build mock runtime");
            rt.block_on(async move {
                let listener = TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("Failed to bind mock backend");
                addr_tx
                    .send(listener.local_addr().expect("Failed to read mock address"))
                    .expect("Test dropped before mock started");

                loop {
                    tokio::select! {
                        _ = &mut shutdown_rx => break,
                        accepted = listener.accept() => {
                            let Ok((stream, _)) = accepted else { continue };
                            let shared = server_shared.clone();
                            tokio::spawn(async move {
                                let service = service_fn(move |req| handle_request(req, shared.clone()));
                                let _ = http1::Builder::new()
                                    .serve_connection(TokioIo::new(stream), service)
                                    .await;
                            });
                        }
                    }
                }
            });
        });

        let addr = addr_rx.recv().expect("Mock backend failed to start");
        Self {
            addr,
            shared,
            shutdown: Some(shutdown_tx),
        }
    }

    /// Base URL to point an `ApiClient` at
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client bound to this backend
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url(), Duration::from_secs(5)).expect("Failed to create client")
    }

    /// Answer `method path` with `response` from now on
    pub fn route(&self, method: &str, path: &str, response: MockResponse) {
        self.shared
            .routes
            .lock()
            .unwrap()
            .insert(format!("{} {}", method, path), response);
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().unwrap().clone()
    }

    /// Requests received for `method path`
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    /// Number of requests received for `method path`
    pub fn hits(&self, method: &str, path: &str) -> usize {
        self.requests_to(method, path).len()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

async fn handle_request(
    req: Request<Incoming>,
    shared: Arc<Shared>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let body = req.collect().await?.to_bytes();

    shared.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        body: String::from_utf8_lossy(&body).to_string(),
    });

    let canned = shared
        .routes
        .lock()
        .unwrap()
        .get(&format!("{} {}", method, path))
        .cloned()
        .unwrap_or_else(|| MockResponse::json(404, serde_json::json!({ "detail": "Not Found" })));

    if !canned.delay.is_zero() {
        tokio::time::sleep(canned.delay).await;
    }

    Ok(Response::builder()
        .status(canned.status)
        .header("content-type", canned.content_type)
        .body(Full::new(Bytes::from(canned.body)))
        .unwrap())
}

/// A typical classification verdict
pub fn sample_verdict() -> serde_json::Value {
    serde_json::json!({
        "category": "maintenance",
        "priority": "high",
        "action": "route_to_pm",
        "reply": "Thanks John, we'll send a plumber to 3A today.",
        "confidence": 0.92,
        "entities": { "issue": "leaking sink", "location": "kitchen" }
    })
}

/// Store over the demo portfolio, persisted inside a fresh temp dir
pub fn demo_store() -> (PropertyStore, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let portfolio = PortfolioFile::new(temp_dir.path().join("properties.json"));
    (PropertyStore::with_properties(portfolio, demo_properties()), temp_dir)
}

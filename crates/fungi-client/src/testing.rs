//! Test utilities for fungi-client
//!
//! Provides an in-process stub of the prediction service and a
//! [`TestServer`] helper for integration tests.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use parking_lot::Mutex;
use tokio::net::TcpListener;

use crate::types::{ErrorBody, Prediction};
use crate::{PredictClient, Result};

/// Extensions the stub accepts, mirroring the production service's
/// upload allowlist.
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// One scripted response from the stub service
#[derive(Debug)]
pub enum StubReply {
    /// 200 with a well-formed prediction body
    Predict { label: String, score: f64 },
    /// Non-success status with a `{"error": ...}` body
    Reject { status: u16, error: String },
    /// Arbitrary status and body, for malformed-response cases
    Raw { status: u16, body: String },
    /// Sleep before answering with the inner reply
    Delayed { delay: Duration, reply: Box<StubReply> },
}

impl StubReply {
    pub fn predict(label: impl Into<String>, score: f64) -> Self {
        Self::Predict {
            label: label.into(),
            score,
        }
    }

    pub fn reject(status: u16, error: impl Into<String>) -> Self {
        Self::Reject {
            status,
            error: error.into(),
        }
    }

    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Self::Raw {
            status,
            body: body.into(),
        }
    }

    pub fn delayed(delay: Duration, reply: StubReply) -> Self {
        Self::Delayed {
            delay,
            reply: Box::new(reply),
        }
    }
}

/// Scripted stand-in for the prediction service.
///
/// Replies are served in FIFO order; an exhausted script answers 500 so a
/// test that under-provisions replies fails loudly. Every `/predict` hit is
/// counted, including ones the stub itself rejects, so tests can assert
/// that no network call was made at all.
#[derive(Clone, Default)]
pub struct StubService {
    inner: Arc<StubInner>,
}

#[derive(Default)]
struct StubInner {
    replies: Mutex<VecDeque<StubReply>>,
    hits: AtomicUsize,
}

impl StubService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scripted reply
    pub fn enqueue(&self, reply: StubReply) {
        self.inner.replies.lock().push_back(reply);
    }

    /// Number of `/predict` requests received so far
    pub fn hits(&self) -> usize {
        self.inner.hits.load(Ordering::SeqCst)
    }

    fn next_reply(&self) -> Option<StubReply> {
        self.inner.replies.lock().pop_front()
    }
}

/// Build a router exposing the stub's `POST /predict` route.
///
/// The route validates the upload the way the production service does
/// before consulting the script: a missing `file` part, an empty file
/// name, and a disallowed extension each produce a 400 with the
/// corresponding error text.
pub fn stub_router(stub: StubService) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .with_state(stub)
}

async fn predict(State(stub): State<StubService>, mut multipart: Multipart) -> Response {
    stub.inner.hits.fetch_add(1, Ordering::SeqCst);

    let mut file: Option<String> = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or_default().to_string();
            // Drain the part so the body is fully read
            let _ = field.bytes().await;
            file = Some(name);
        }
    }

    let Some(name) = file else {
        return error_response(StatusCode::BAD_REQUEST, "No file provided");
    };
    if name.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No file selected");
    }
    if !allowed_file(&name) {
        return error_response(StatusCode::BAD_REQUEST, "File type not allowed");
    }

    let Some(reply) = stub.next_reply() else {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "no scripted reply");
    };
    render_reply(reply).await
}

async fn render_reply(mut reply: StubReply) -> Response {
    loop {
        match reply {
            StubReply::Delayed { delay, reply: next } => {
                tokio::time::sleep(delay).await;
                reply = *next;
            }
            StubReply::Predict { label, score } => {
                return (StatusCode::OK, Json(Prediction { label, score })).into_response();
            }
            StubReply::Reject { status, error } => {
                let status = StatusCode::from_u16(status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                return error_response(status, &error);
            }
            StubReply::Raw { status, body } => {
                let status = StatusCode::from_u16(status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                return (
                    status,
                    [(header::CONTENT_TYPE, "application/json")],
                    body,
                )
                    .into_response();
            }
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

fn allowed_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: PredictClient,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Create a new test server from an axum Router
    ///
    /// # Example
    ///
    /// ```ignore
    /// use fungi_client::testing::{stub_router, StubService, TestServer};
    ///
    /// let stub = StubService::new();
    /// let server = TestServer::start(stub_router(stub.clone())).await?;
    ///
    /// // Use server.client to make requests
    /// let prediction = server.client.predict(&image).await?;
    /// ```
    pub async fn start(router: Router) -> Result<Self> {
        Self::start_with_timeout(router, Duration::from_secs(5), Duration::from_secs(2)).await
    }

    /// Create a new test server with custom timeouts
    pub async fn start_with_timeout(
        router: Router,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        // Spawn the server
        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Give server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        let base_url = format!("http://{}", addr);
        let client = PredictClient::with_config(&base_url, timeout, connect_timeout)?;

        Ok(Self {
            addr,
            client,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Get the base URL of the test server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get a reference to the client
    pub fn client(&self) -> &PredictClient {
        &self.client
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Send shutdown signal if not already done
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        // Abort the task if still running
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_file_extensions() {
        assert!(allowed_file("photo.jpg"));
        assert!(allowed_file("photo.JPEG"));
        assert!(allowed_file("cap.webp"));
        assert!(!allowed_file("notes.txt"));
        assert!(!allowed_file("noextension"));
        assert!(!allowed_file(""));
    }

    #[test]
    fn test_stub_script_is_fifo() {
        let stub = StubService::new();
        stub.enqueue(StubReply::predict("a", 0.1));
        stub.enqueue(StubReply::predict("b", 0.2));

        match stub.next_reply() {
            Some(StubReply::Predict { label, .. }) => assert_eq!(label, "a"),
            other => panic!("unexpected reply: {:?}", other),
        }
        match stub.next_reply() {
            Some(StubReply::Predict { label, .. }) => assert_eq!(label, "b"),
            other => panic!("unexpected reply: {:?}", other),
        }
        assert!(stub.next_reply().is_none());
    }
}

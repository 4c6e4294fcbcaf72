//! Test doubles for the upload form

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use fungi_client::{ImageFile, PredictError, Prediction};
use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::service::PredictionService;
use crate::view::SubmitView;

/// View double that records every write the form makes
#[derive(Debug, Default)]
pub struct RecordingView {
    pub reveal_count: usize,
    pub prediction: Option<String>,
    pub confidence: Option<String>,
    pub alerts: Vec<String>,
}

impl RecordingView {
    /// Whether the result region's hidden state has been cleared
    pub fn revealed(&self) -> bool {
        self.reveal_count > 0
    }
}

impl SubmitView for RecordingView {
    fn reveal_result(&mut self) {
        self.reveal_count += 1;
    }

    fn set_prediction(&mut self, text: &str) {
        self.prediction = Some(text.to_string());
    }

    fn set_confidence(&mut self, text: &str) {
        self.confidence = Some(text.to_string());
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

enum ScriptedReply {
    Ready(Result<Prediction, PredictError>),
    Gated {
        release: oneshot::Receiver<Result<Prediction, PredictError>>,
        entered: oneshot::Sender<()>,
    },
}

/// Handle to a gated scripted reply.
///
/// `entered` fires once the form's request has reached the service;
/// `release` resolves the request with the given result.
pub struct Gate {
    pub release: oneshot::Sender<Result<Prediction, PredictError>>,
    pub entered: oneshot::Receiver<()>,
}

/// Scripted stand-in for the prediction service, replies served in FIFO
/// order. Gated replies park the caller until the test releases them,
/// which is how overlapping-submission races are driven deterministically.
#[derive(Clone, Default)]
pub struct ScriptedService {
    inner: Arc<ScriptedInner>,
}

#[derive(Default)]
struct ScriptedInner {
    replies: Mutex<VecDeque<ScriptedReply>>,
    uploads: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reply that resolves immediately
    pub fn push(&self, reply: Result<Prediction, PredictError>) {
        self.inner
            .replies
            .lock()
            .push_back(ScriptedReply::Ready(reply));
    }

    /// Append a reply the test resolves by hand
    pub fn push_gated(&self) -> Gate {
        let (release_tx, release_rx) = oneshot::channel();
        let (entered_tx, entered_rx) = oneshot::channel();
        self.inner.replies.lock().push_back(ScriptedReply::Gated {
            release: release_rx,
            entered: entered_tx,
        });
        Gate {
            release: release_tx,
            entered: entered_rx,
        }
    }

    /// Number of predict calls received
    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    /// File names the form uploaded, in call order
    pub fn uploads(&self) -> Vec<String> {
        self.inner.uploads.lock().clone()
    }
}

#[async_trait]
impl PredictionService for ScriptedService {
    async fn predict(&self, image: &ImageFile) -> Result<Prediction, PredictError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.uploads.lock().push(image.name.clone());

        let reply = self.inner.replies.lock().pop_front();
        match reply {
            Some(ScriptedReply::Ready(result)) => result,
            Some(ScriptedReply::Gated { release, entered }) => {
                let _ = entered.send(());
                release.await.unwrap_or_else(|_| {
                    Err(PredictError::MalformedResponse(
                        "scripted gate dropped".to_string(),
                    ))
                })
            }
            None => Err(PredictError::MalformedResponse(
                "no scripted reply".to_string(),
            )),
        }
    }
}

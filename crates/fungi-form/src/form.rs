//! The upload form handler

use std::sync::atomic::{AtomicU64, Ordering};

use fungi_client::{ImageFile, PredictError, Prediction};
use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, error};

use crate::render;
use crate::service::PredictionService;
use crate::view::SubmitView;

/// Alert shown when submit is attempted with nothing selected
pub const NO_FILE_MESSAGE: &str = "Please select an image first";

/// Generic alert for transport-level failures; the cause goes to the
/// operator log, never to the user
pub const UPLOAD_FAILED_MESSAGE: &str = "Error uploading image";

/// What a single submission attempt did
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Success: the result region was revealed and both text slots set
    Rendered(Prediction),
    /// Empty selection; the user was alerted, no network call was made
    NoFileSelected,
    /// The service answered non-success; its error text was alerted
    Rejected(String),
    /// Transport failure or malformed response; generic alert raised
    Failed,
    /// A newer submission was issued while this one was in flight; the
    /// response was discarded without touching the view
    Stale,
}

/// One upload form bound to a prediction service and a view.
///
/// Holds the current file selection the way a file-input control does:
/// selecting replaces the whole list, and submission takes the first
/// entry only (further selected files are ignored by design).
///
/// Overlapping submissions are legal; each carries a token from a
/// monotonically increasing counter and only the latest-issued one may
/// update the view, so a slow early response can never overwrite a
/// newer result.
pub struct UploadForm<S, V> {
    service: S,
    view: Mutex<V>,
    selection: Mutex<Vec<ImageFile>>,
    latest: AtomicU64,
}

impl<S, V> UploadForm<S, V>
where
    S: PredictionService,
    V: SubmitView,
{
    pub fn new(service: S, view: V) -> Self {
        Self {
            service,
            view: Mutex::new(view),
            selection: Mutex::new(Vec::new()),
            latest: AtomicU64::new(0),
        }
    }

    /// Replace the selection with a single file
    pub fn select_file(&self, file: ImageFile) {
        self.select_files(vec![file]);
    }

    /// Replace the selection wholesale, like re-picking in a file dialog
    pub fn select_files(&self, files: Vec<ImageFile>) {
        *self.selection.lock() = files;
    }

    /// Empty the selection
    pub fn clear_selection(&self) {
        self.selection.lock().clear();
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.lock().is_empty()
    }

    /// Access the view, e.g. to inspect it after a submission
    pub fn view(&self) -> MutexGuard<'_, V> {
        self.view.lock()
    }

    /// Run one submission attempt end-to-end.
    ///
    /// Exactly one of the [`SubmitOutcome`] variants happens per call:
    /// the empty-selection precondition alerts synchronously and skips
    /// the network entirely; otherwise the first selected file is sent
    /// and the response is rendered, alerted, or discarded as stale.
    pub async fn submit(&self) -> SubmitOutcome {
        let file = self.selection.lock().first().cloned();
        let Some(file) = file else {
            self.view.lock().alert(NO_FILE_MESSAGE);
            return SubmitOutcome::NoFileSelected;
        };

        let token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.service.predict(&file).await;

        if self.latest.load(Ordering::SeqCst) != token {
            debug!(token, "discarding stale prediction response");
            return SubmitOutcome::Stale;
        }

        match result {
            Ok(prediction) => {
                let mut view = self.view.lock();
                view.reveal_result();
                view.set_prediction(&render::prediction_line(&prediction.label));
                view.set_confidence(&render::confidence_line(prediction.score));
                SubmitOutcome::Rendered(prediction)
            }
            Err(PredictError::Rejected { status, message }) => {
                debug!(status, message = %message, "prediction service rejected the upload");
                self.view.lock().alert(&format!("Error: {}", message));
                SubmitOutcome::Rejected(message)
            }
            Err(err) => {
                error!(error = %err, "image upload failed");
                self.view.lock().alert(UPLOAD_FAILED_MESSAGE);
                SubmitOutcome::Failed
            }
        }
    }
}

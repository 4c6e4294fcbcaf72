//! Upload Form Handler
//!
//! Drives one image-classification submission end-to-end: validate the
//! file selection, send the image to the prediction service, and update
//! the result view (or raise an alert) with whatever comes back.
//!
//! The two collaborators are explicit seams so the handler can be
//! exercised without a real page or a real server:
//!
//! - [`PredictionService`] — the remote classifier, implemented for
//!   `fungi_client::PredictClient` and for scripted fakes in tests.
//! - [`SubmitView`] — the result region (hidden until the first success)
//!   plus the alert channel.
//!
//! # Example
//!
//! ```rust,no_run
//! use fungi_client::{ImageFile, PredictClient};
//! use fungi_form::{SubmitOutcome, UploadForm};
//! # use fungi_form::testing::RecordingView;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), fungi_client::PredictError> {
//! let client = PredictClient::new("http://localhost:5000")?;
//! let form = UploadForm::new(client, RecordingView::default());
//!
//! form.select_file(ImageFile::from_path("photo.jpg".as_ref())?);
//! match form.submit().await {
//!     SubmitOutcome::Rendered(prediction) => println!("{}", prediction.label),
//!     other => eprintln!("submission did not render: {:?}", other),
//! }
//! # Ok(())
//! # }
//! ```

mod form;
pub mod render;
mod service;
pub mod testing;
mod view;

pub use form::{SubmitOutcome, UploadForm, NO_FILE_MESSAGE, UPLOAD_FAILED_MESSAGE};
pub use service::PredictionService;
pub use view::SubmitView;

// Re-export client types callers need alongside the form
pub use fungi_client::{ImageFile, PredictError, Prediction};

//! Fungi Prediction Client Library
//!
//! Provides a typed HTTP client for the fungi species prediction service.
//!
//! # Example
//!
//! ```rust,no_run
//! use fungi_client::{ImageFile, PredictClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fungi_client::PredictError> {
//!     let client = PredictClient::new("http://localhost:5000")?;
//!
//!     let image = ImageFile::from_path("photo.jpg".as_ref())?;
//!     let prediction = client.predict(&image).await?;
//!
//!     println!("{} ({:.2}%)", prediction.label, prediction.score * 100.0);
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module provides an in-process stub of the prediction
//! service plus a [`testing::TestServer`] that binds it to an ephemeral
//! port:
//!
//! ```rust,ignore
//! use fungi_client::testing::{stub_router, StubReply, StubService, TestServer};
//!
//! let stub = StubService::new();
//! stub.enqueue(StubReply::predict("Amanita muscaria", 0.9231));
//!
//! let server = TestServer::start(stub_router(stub.clone())).await?;
//! let prediction = server.client.predict(&image).await?;
//! assert_eq!(stub.hits(), 1);
//! ```

mod client;
mod error;
pub mod testing;
mod types;

pub use client::PredictClient;
pub use error::{PredictError, Result};
pub use types::{ErrorBody, ImageFile, Prediction};

//! Prediction service seam

use async_trait::async_trait;
use fungi_client::{ImageFile, PredictClient, Prediction, Result};

/// Seam between the upload form and the remote classifier.
///
/// The form only ever issues one call per submission attempt; retries,
/// cancellation, and timeouts are out of its hands.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, image: &ImageFile) -> Result<Prediction>;
}

#[async_trait]
impl PredictionService for PredictClient {
    async fn predict(&self, image: &ImageFile) -> Result<Prediction> {
        PredictClient::predict(self, image).await
    }
}

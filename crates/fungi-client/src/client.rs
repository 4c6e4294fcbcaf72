//! Prediction service HTTP client implementation

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};
use url::Url;

use crate::error::{PredictError, Result};
use crate::types::{ErrorBody, ImageFile, Prediction};

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Multipart field name the service expects the image under
const FILE_FIELD: &str = "file";

/// Prediction service REST client
///
/// Issues one `POST /predict` per submission and maps the response onto
/// [`Prediction`] or [`PredictError`].
#[derive(Debug, Clone)]
pub struct PredictClient {
    client: Client,
    base_url: Url,
}

impl PredictClient {
    /// Create a new prediction client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the prediction service (e.g., "http://localhost:5000")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a new prediction client with custom transport timeouts.
    ///
    /// The submission logic itself never enforces a deadline; timeouts
    /// live entirely in the transport layer configured here.
    pub fn with_config(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        let base_url = Url::parse(base_url)?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get a reference to the underlying HTTP client.
    ///
    /// Useful for making custom requests while reusing the client's
    /// connection pool (e.g., hand-built multipart bodies in tests).
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Submit an image for classification
    ///
    /// Sends exactly one multipart POST with a single part named `file`.
    /// A 2xx response is parsed as `{"label": ..., "score": ...}` and
    /// shape-checked; any non-2xx response is parsed as `{"error": ...}`
    /// and surfaced as [`PredictError::Rejected`].
    #[instrument(skip(self, image), fields(file = %image.name, bytes = image.bytes.len()))]
    pub async fn predict(&self, image: &ImageFile) -> Result<Prediction> {
        let url = self.base_url.join("/predict")?;
        debug!("Uploading {} to {}", image.name, url);

        let part = Part::bytes(image.bytes.clone())
            .file_name(image.name.clone())
            .mime_str(image.mime_type().essence_str())?;
        let form = Form::new().part(FILE_FIELD, part);

        let response = self.client.post(url).multipart(form).send().await?;
        self.handle_response(response).await
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    /// Handle response and deserialize the prediction
    async fn handle_response(&self, response: reqwest::Response) -> Result<Prediction> {
        let status = response.status();

        if status.is_success() {
            let prediction: Prediction = response
                .json()
                .await
                .map_err(|e| PredictError::MalformedResponse(e.to_string()))?;

            prediction
                .validate()
                .map_err(PredictError::MalformedResponse)?;

            Ok(prediction)
        } else {
            Err(self.extract_error(response, status).await)
        }
    }

    /// Extract error from failed response
    ///
    /// A non-success response without a parseable `{"error": ...}` body is
    /// a malformed response, not a rejection; there is no server-supplied
    /// text to show the user verbatim.
    async fn extract_error(&self, response: reqwest::Response, status: StatusCode) -> PredictError {
        match response.json::<ErrorBody>().await {
            Ok(body) => PredictError::rejected(status.as_u16(), body.error),
            Err(e) => PredictError::MalformedResponse(format!(
                "HTTP {} with undecodable error body: {}",
                status.as_u16(),
                e
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = PredictClient::new("http://localhost:5000");
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let client = PredictClient::new("not a url");
        assert!(matches!(client, Err(PredictError::InvalidUrl(_))));
    }

    #[test]
    fn test_predict_endpoint_joins_onto_base() {
        let client = PredictClient::new("http://localhost:5000").unwrap();
        let url = client.base_url().join("/predict").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/predict");
    }
}

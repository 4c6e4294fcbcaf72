//! Request and response types for the prediction client

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// One image payload, built fresh per submission attempt
#[derive(Debug, Clone)]
pub struct ImageFile {
    /// File name as it appears in the multipart part (e.g. "photo.jpg")
    pub name: String,
    /// Raw image bytes
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read an image from disk, taking the part name from the path's
    /// final component.
    pub fn from_path(path: &Path) -> crate::Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("path has no file name: {}", path.display()),
                )
            })?;

        let bytes = std::fs::read(path)?;

        Ok(Self { name, bytes })
    }

    /// MIME type guessed from the file name extension
    pub fn mime_type(&self) -> mime_guess::Mime {
        mime_guess::from_path(&self.name).first_or_octet_stream()
    }
}

/// Successful prediction returned by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted species label
    pub label: String,
    /// Confidence score in [0, 1]
    pub score: f64,
}

impl Prediction {
    /// Check the documented shape constraints beyond what serde enforces.
    ///
    /// A body that deserializes but carries a non-finite or out-of-range
    /// score must never reach the UI.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.score.is_finite() {
            return Err(format!("score is not finite: {}", self.score));
        }
        if !(0.0..=1.0).contains(&self.score) {
            return Err(format!("score {} outside [0, 1]", self.score));
        }
        Ok(())
    }
}

/// Error body returned by the service on non-success responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

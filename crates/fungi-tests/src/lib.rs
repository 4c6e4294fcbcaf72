//! Shared fixtures for the end-to-end tests

use fungi_client::{ImageFile, Prediction};

/// A small JPEG-flavored payload with an accepted extension
pub fn photo() -> ImageFile {
    ImageFile::new("photo.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10])
}

pub fn amanita() -> Prediction {
    Prediction {
        label: "Amanita muscaria".to_string(),
        score: 0.9231,
    }
}

//! Result region text formatting

/// Text for the prediction slot
pub fn prediction_line(label: &str) -> String {
    format!("Predicted Species: {}", label)
}

/// Text for the confidence slot.
///
/// The score is scaled to a percentage and fixed to exactly two decimal
/// places: 0.9231 renders as "92.31%", 1.0 as "100.00%".
pub fn confidence_line(score: f64) -> String {
    format!("Confidence: {:.2}%", score * 100.0)
}

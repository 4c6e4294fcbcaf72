//! View seam for the upload form

/// The display surface the form writes to.
///
/// Mirrors the page contract: one result region that starts hidden, two
/// text slots inside it, and a blocking-style notification channel. The
/// form never touches anything else.
pub trait SubmitView: Send {
    /// Clear the result region's hidden state.
    ///
    /// Called exactly once per successful submission, before the text
    /// slots are written.
    fn reveal_result(&mut self);

    /// Set the prediction text slot (e.g. "Predicted Species: ...")
    fn set_prediction(&mut self, text: &str);

    /// Set the confidence text slot (e.g. "Confidence: 92.31%")
    fn set_confidence(&mut self, text: &str);

    /// Notify the user. Used for the empty-selection precondition and
    /// for every failed submission; never for successes.
    fn alert(&mut self, message: &str);
}

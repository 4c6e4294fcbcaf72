//! Console implementation of the form's view seam

use fungi_form::SubmitView;

use crate::output::{OutputContext, OutputFormat};

/// Renders the result region onto the terminal.
///
/// In JSON output mode the text slots stay silent (the classify command
/// prints the JSON document itself); alerts always go to stderr.
pub struct ConsoleView {
    ctx: OutputContext,
}

impl ConsoleView {
    pub fn new(ctx: OutputContext) -> Self {
        Self { ctx }
    }

    fn text_mode(&self) -> bool {
        self.ctx.format == OutputFormat::Text
    }
}

impl SubmitView for ConsoleView {
    fn reveal_result(&mut self) {
        // A terminal has no hidden region to clear; writing the slots
        // below is the reveal.
    }

    fn set_prediction(&mut self, text: &str) {
        if self.text_mode() {
            self.ctx.success(text);
        }
    }

    fn set_confidence(&mut self, text: &str) {
        if self.text_mode() {
            self.ctx.info(text);
        }
    }

    fn alert(&mut self, message: &str) {
        self.ctx.error(message);
    }
}

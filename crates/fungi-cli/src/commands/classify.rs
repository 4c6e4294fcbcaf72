//! Classify command - submit a photo to the prediction service

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use fungi_client::{ImageFile, PredictClient};
use fungi_form::{SubmitOutcome, UploadForm};

use crate::output::{OutputContext, OutputFormat};
use crate::view::ConsoleView;

/// Classify one image and render the result.
///
/// All user-facing rendering goes through the form's view; this command
/// only reads the file, drives the submission, and maps the outcome to
/// an exit code (plus the JSON document in `--output json` mode).
pub async fn classify(client: &PredictClient, image: &Path, ctx: &OutputContext) -> Result<ExitCode> {
    let file = ImageFile::from_path(image)
        .with_context(|| format!("Failed to read image: {}", image.display()))?;

    let form = UploadForm::new(client.clone(), ConsoleView::new(ctx.clone()));
    form.select_file(file);

    match form.submit().await {
        SubmitOutcome::Rendered(prediction) => {
            if ctx.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&prediction)?);
            }
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::FAILURE),
    }
}

use super::output::CommandOutput;
use crate::services::pipeline::Pipeline;
use crate::services::reporter;
use std::path::PathBuf;

/// OCR a list of images. Every item is attempted; the command succeeds only
/// when every item did.
pub fn ocr_batch(
    pipeline: &Pipeline,
    paths: &[PathBuf],
    prompt: Option<&str>,
    parallel: bool,
    json: bool,
) -> Result<CommandOutput, String> {
    let batch = if parallel {
        pipeline.run_ocr_batch_parallel(paths, prompt)
    } else {
        pipeline.run_ocr_batch(paths, prompt)
    };

    let stdout = if json {
        reporter::batch_to_json(&batch).map_err(|e| format!("Failed to serialize batch: {}", e))?
    } else {
        reporter::render_batch_text(&batch)
    };

    Ok(CommandOutput::new(stdout, batch.summary.failed == 0))
}

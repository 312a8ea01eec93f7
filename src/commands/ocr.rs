use super::output::CommandOutput;
use crate::models::report::Report;
use crate::services::pipeline::Pipeline;
use crate::services::reporter;
use std::path::Path;

/// Run OCR on one image and render the report
pub fn ocr_image(
    pipeline: &Pipeline,
    path: &Path,
    prompt: Option<&str>,
    json: bool,
) -> Result<CommandOutput, String> {
    if !path.exists() {
        return Err(format!("Image file not found: {}", path.display()));
    }

    let report = pipeline.ocr_report(path, prompt);
    render(&report, json)
}

/// Shared by the single-item commands
pub(crate) fn render(report: &Report, json: bool) -> Result<CommandOutput, String> {
    let stdout = if json {
        reporter::to_json(report).map_err(|e| format!("Failed to serialize report: {}", e))?
    } else {
        reporter::render_text(report)
    };
    Ok(CommandOutput::new(stdout, report.success))
}

use super::ocr::render;
use super::output::CommandOutput;
use crate::services::pipeline::Pipeline;
use std::path::Path;

/// Compare two face images. Missing files are reported in the result, not as errors.
pub fn verify_faces(
    pipeline: &Pipeline,
    image_a: &Path,
    image_b: &Path,
    json: bool,
) -> Result<CommandOutput, String> {
    let report = pipeline.verification_report(image_a, image_b);
    render(&report, json)
}

use crate::error::PipelineError;
use crate::models::image_payload::{ImagePayload, MimeType};
use base64::{engine::general_purpose, Engine as _};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static DATA_URI: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^data:(image/[A-Za-z0-9.+-]+);base64,([A-Za-z0-9+/=]*)$"));

/// Read an image file and tag it with the MIME type implied by its extension
pub fn encode(path: &Path) -> Result<ImagePayload, PipelineError> {
    let bytes = fs::read(path).map_err(|e| PipelineError::file(path, e))?;
    let mime_type = MimeType::from_path(path);

    tracing::debug!(
        path = %path.display(),
        mime_type = %mime_type,
        size = bytes.len(),
        "encoded image"
    );

    Ok(ImagePayload::new(mime_type, bytes))
}

/// Render a payload as `data:<mime>;base64,<data>`
pub fn to_data_uri(payload: &ImagePayload) -> String {
    format!(
        "data:{};base64,{}",
        payload.mime_type(),
        general_purpose::STANDARD.encode(payload.bytes())
    )
}

/// Parse a `data:image/...;base64,...` string back into its MIME type and bytes
pub fn decode_data_uri(uri: &str) -> Result<(MimeType, Vec<u8>), String> {
    let re = DATA_URI
        .as_ref()
        .map_err(|e| format!("Regex error: {}", e))?;

    let caps = re
        .captures(uri)
        .ok_or("Expected a data:image/...;base64,... string")?;

    let mime = &caps[1];
    let mime_type =
        MimeType::parse(mime).ok_or_else(|| format!("Unsupported image MIME type: {}", mime))?;

    let bytes = general_purpose::STANDARD
        .decode(&caps[2])
        .map_err(|e| format!("Invalid base64 data: {}", e))?;

    Ok((mime_type, bytes))
}

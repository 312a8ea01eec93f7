use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Transport MIME type of an encoded image
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum MimeType {
    #[default]
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/gif")]
    Gif,
    #[serde(rename = "image/webp")]
    Webp,
    #[serde(rename = "image/heic")]
    Heic,
}

impl MimeType {
    /// Look up a MIME type from a file extension (case-insensitive)
    ///
    /// Unrecognized extensions fall back to JPEG.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Self::Jpeg,
            "png" => Self::Png,
            "gif" => Self::Gif,
            "webp" => Self::Webp,
            "heic" => Self::Heic,
            _ => Self::Jpeg,
        }
    }

    /// Infer from a path's extension, JPEG when there is none
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or_default()
    }

    /// Parse an `image/...` MIME string. Returns None for anything unknown.
    pub fn parse(mime: &str) -> Option<Self> {
        match mime.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            "image/webp" => Some(Self::Webp),
            "image/heic" => Some(Self::Heic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
            Self::Heic => "image/heic",
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw image bytes tagged with their transport MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    mime_type: MimeType,
    bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn new(mime_type: MimeType, bytes: Vec<u8>) -> Self {
        Self { mime_type, bytes }
    }

    pub fn mime_type(&self) -> MimeType {
        self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(MimeType::from_extension("jpg"), MimeType::Jpeg);
        assert_eq!(MimeType::from_extension("jpeg"), MimeType::Jpeg);
        assert_eq!(MimeType::from_extension("png"), MimeType::Png);
        assert_eq!(MimeType::from_extension("gif"), MimeType::Gif);
        assert_eq!(MimeType::from_extension("webp"), MimeType::Webp);
        assert_eq!(MimeType::from_extension("heic"), MimeType::Heic);
    }

    #[test]
    fn test_extension_lookup_ignores_case() {
        assert_eq!(MimeType::from_extension("JPG"), MimeType::Jpeg);
        assert_eq!(MimeType::from_extension("PnG"), MimeType::Png);
        assert_eq!(MimeType::from_path(Path::new("input/003.JPG")), MimeType::Jpeg);
        assert_eq!(MimeType::from_path(Path::new("scan.HEIC")), MimeType::Heic);
    }

    #[test]
    fn test_unknown_extension_defaults_to_jpeg() {
        assert_eq!(MimeType::from_extension("bmp"), MimeType::Jpeg);
        assert_eq!(MimeType::from_extension(""), MimeType::Jpeg);
        assert_eq!(MimeType::from_path(Path::new("no_extension")), MimeType::Jpeg);
        assert_eq!(MimeType::from_path(Path::new("archive.tar.gz")), MimeType::Jpeg);
    }

    #[test]
    fn test_mime_strings() {
        assert_eq!(MimeType::Webp.to_string(), "image/webp");
        assert_eq!(MimeType::parse("image/PNG"), Some(MimeType::Png));
        assert_eq!(MimeType::parse("application/pdf"), None);
        assert_eq!(
            serde_json::to_string(&MimeType::Gif).unwrap(),
            "\"image/gif\""
        );
    }
}

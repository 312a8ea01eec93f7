use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Model identity used for every face comparison
pub const FACE_MODEL_NAME: &str = "VGG-Face";
/// Distance metric used for every face comparison
pub const FACE_DISTANCE_METRIC: &str = "cosine";
/// Detection failures must not abort the comparison
pub const FACE_ENFORCE_DETECTION: bool = false;

/// Fixed model configuration handed to the face backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceModelSettings {
    pub model_name: &'static str,
    pub distance_metric: &'static str,
    pub enforce_detection: bool,
}

impl Default for FaceModelSettings {
    fn default() -> Self {
        Self {
            model_name: FACE_MODEL_NAME,
            distance_metric: FACE_DISTANCE_METRIC,
            enforce_detection: FACE_ENFORCE_DETECTION,
        }
    }
}

/// Two images to compare
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub image_a: PathBuf,
    pub image_b: PathBuf,
}

impl VerificationRequest {
    pub fn new(image_a: impl Into<PathBuf>, image_b: impl Into<PathBuf>) -> Self {
        Self {
            image_a: image_a.into(),
            image_b: image_b.into(),
        }
    }
}

/// Comparison as reported by a face backend, already normalized to Rust types
#[derive(Debug, Clone, PartialEq)]
pub struct FaceMatch {
    pub distance: f64,
    pub verified: bool,
    pub threshold: f64,
    pub model_name: String,
    pub detector_backend: String,
}

/// Verification outcome. The verdict is always the backend's, never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct VerificationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detector_backend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VerificationResult {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

impl From<FaceMatch> for VerificationResult {
    fn from(face: FaceMatch) -> Self {
        Self {
            success: true,
            distance: Some(face.distance),
            verified: Some(face.verified),
            threshold: Some(face.threshold),
            model_name: Some(face.model_name),
            detector_backend: Some(face.detector_backend),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_settings() {
        let settings = FaceModelSettings::default();
        assert_eq!(settings.model_name, "VGG-Face");
        assert_eq!(settings.distance_metric, "cosine");
        assert!(!settings.enforce_detection);
    }

    #[test]
    fn test_face_match_copied_verbatim() {
        let result = VerificationResult::from(FaceMatch {
            distance: 0.25,
            verified: true,
            threshold: 0.4,
            model_name: "VGG-Face".to_string(),
            detector_backend: "opencv".to_string(),
        });
        assert!(result.success);
        assert_eq!(result.distance, Some(0.25));
        assert_eq!(result.verified, Some(true));
        assert_eq!(result.threshold, Some(0.4));
        assert_eq!(result.detector_backend.as_deref(), Some("opencv"));
        assert_eq!(result.error, None);
    }

    #[test]
    fn test_failure_serializes_without_payload_fields() {
        let json = serde_json::to_value(VerificationResult::failure("bad image")).unwrap();
        assert_eq!(json, serde_json::json!({ "success": false, "error": "bad image" }));
    }
}

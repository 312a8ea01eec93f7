pub mod deepface;

pub use deepface::DeepFaceBackend;

use crate::error::BackendError;
use crate::models::verification::{
    FaceMatch, FaceModelSettings, VerificationRequest, VerificationResult,
};
use std::path::Path;

/// Face-similarity backend seam
pub trait FaceVerifier: Send + Sync {
    /// Compare the faces in two existing image files
    fn verify(
        &self,
        image_a: &Path,
        image_b: &Path,
        settings: &FaceModelSettings,
    ) -> Result<FaceMatch, BackendError>;
}

/// Run one verification. Never returns an error: missing inputs and backend
/// failures become a failed `VerificationResult`.
pub fn invoke_verification(
    verifier: &dyn FaceVerifier,
    request: &VerificationRequest,
) -> VerificationResult {
    if !request.image_a.exists() {
        return VerificationResult::failure(format!(
            "image A not found: {}",
            request.image_a.display()
        ));
    }
    if !request.image_b.exists() {
        return VerificationResult::failure(format!(
            "image B not found: {}",
            request.image_b.display()
        ));
    }

    let settings = FaceModelSettings::default();
    match verifier.verify(&request.image_a, &request.image_b, &settings) {
        Ok(face) => {
            tracing::info!(
                distance = face.distance,
                threshold = face.threshold,
                verified = face.verified,
                model = %face.model_name,
                "face verification completed"
            );
            VerificationResult::from(face)
        }
        Err(e) => {
            tracing::warn!(error = %e, "face verification failed");
            VerificationResult::failure(e.to_string())
        }
    }
}

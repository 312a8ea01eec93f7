use crate::error::PipelineError;
use crate::models::config::AppConfig;
use crate::models::ocr_result::{OcrOutcome, OcrRequest};
use crate::models::report::{BatchItem, BatchReport, BatchSummary, Report};
use crate::models::verification::{VerificationRequest, VerificationResult};
use crate::services::encoder;
use crate::services::normalizer::{self, InferenceResult};
use crate::services::ocr::HttpOcrClient;
use crate::services::verification::{self, DeepFaceBackend, FaceVerifier};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Encode → invoke → normalize, configured once at construction.
///
/// Holds no mutable state; every call is independent.
pub struct Pipeline {
    ocr: HttpOcrClient,
    verifier: Arc<dyn FaceVerifier>,
    send_mime_type: bool,
}

impl Pipeline {
    pub fn new(ocr: HttpOcrClient, verifier: Arc<dyn FaceVerifier>) -> Self {
        Self {
            ocr,
            verifier,
            send_mime_type: false,
        }
    }

    /// Build the OCR client and the DeepFace backend from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, PipelineError> {
        let ocr = HttpOcrClient::from_config(&config.ocr)?;
        let verifier = Arc::new(DeepFaceBackend::from_config(&config.verification));
        Ok(Self::new(ocr, verifier))
    }

    /// Also send the explicit `mimeType` field on OCR requests
    pub fn with_mime_type_hint(mut self, enabled: bool) -> Self {
        self.send_mime_type = enabled;
        self
    }

    pub fn ocr_client(&self) -> &HttpOcrClient {
        &self.ocr
    }

    /// OCR one image file
    pub fn run_ocr(&self, path: &Path, prompt: Option<&str>) -> Result<OcrOutcome, PipelineError> {
        let payload = encoder::encode(path)?;
        let mut request = OcrRequest::new(payload).with_prompt(prompt.map(str::to_string));
        if self.send_mime_type {
            request = request.with_mime_type_hint();
        }
        self.ocr.invoke(&request)
    }

    /// OCR one image and project the outcome, including failures, onto a report
    pub fn ocr_report(&self, path: &Path, prompt: Option<&str>) -> Report {
        match self.run_ocr(path, prompt) {
            Ok(outcome) => normalizer::to_report(&InferenceResult::Ocr(outcome)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "OCR invocation failed");
                normalizer::error_report(&e)
            }
        }
    }

    /// Compare two face images. Failures are folded into the result.
    pub fn run_verification(&self, image_a: &Path, image_b: &Path) -> VerificationResult {
        let request = VerificationRequest::new(image_a, image_b);
        verification::invoke_verification(self.verifier.as_ref(), &request)
    }

    pub fn verification_report(&self, image_a: &Path, image_b: &Path) -> Report {
        let result = self.run_verification(image_a, image_b);
        normalizer::to_report(&InferenceResult::Verification(result))
    }

    /// OCR each image in order, each to completion before the next.
    /// A failed item never stops the batch.
    pub fn run_ocr_batch(&self, paths: &[PathBuf], prompt: Option<&str>) -> BatchReport {
        let items = paths
            .iter()
            .enumerate()
            .map(|(index, path)| {
                tracing::info!(
                    item = index + 1,
                    total = paths.len(),
                    path = %path.display(),
                    "processing"
                );
                self.batch_item(path, prompt)
            })
            .collect();
        finish_batch(items)
    }

    /// Like `run_ocr_batch` but items run concurrently on the rayon pool.
    /// Output order still matches input order.
    pub fn run_ocr_batch_parallel(&self, paths: &[PathBuf], prompt: Option<&str>) -> BatchReport {
        let items = paths
            .par_iter()
            .map(|path| self.batch_item(path, prompt))
            .collect();
        finish_batch(items)
    }

    fn batch_item(&self, path: &Path, prompt: Option<&str>) -> BatchItem {
        BatchItem {
            path: path.display().to_string(),
            report: self.ocr_report(path, prompt),
        }
    }
}

fn finish_batch(items: Vec<BatchItem>) -> BatchReport {
    let summary = BatchSummary::from_items(&items);
    tracing::info!(
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "batch finished"
    );
    BatchReport {
        finished_at: chrono::Local::now(),
        summary,
        items,
    }
}

//! Maps backend-native responses onto the crate's result types and projects
//! either result type onto the report shape consumed by the reporter.

use crate::error::{FailureKind, PipelineError};
use crate::models::ocr_result::{OcrEnvelope, OcrOutcome, OcrResult};
use crate::models::report::Report;
use crate::models::verification::VerificationResult;
use serde_json::Value;

/// Either kind of normalized inference outcome
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceResult {
    Ocr(OcrOutcome),
    Verification(VerificationResult),
}

/// Convert an OCR service envelope into an `OcrResult`.
///
/// Values are surfaced as received. A success envelope contributes only its
/// `data` fields; a failure envelope contributes only `error`, `details`
/// and the top-level processing time.
pub fn normalize_ocr_envelope(envelope: OcrEnvelope) -> OcrResult {
    if envelope.success {
        let data = envelope.data.unwrap_or_default();
        let structured_data = match data.structured_data {
            Some(Value::Object(map)) => Some(map),
            Some(other) => {
                tracing::debug!(kind = json_kind(&other), "ignoring non-object structuredData");
                None
            }
            None => None,
        };

        OcrResult {
            success: true,
            extracted_text: data.extracted_text,
            document_type: data.document_type,
            confidence: data.confidence,
            processing_time_ms: data.processing_time,
            api_version: data.api_version,
            structured_data,
            error: None,
            error_details: None,
        }
    } else {
        OcrResult {
            success: false,
            processing_time_ms: envelope.processing_time,
            error: Some(envelope.error.unwrap_or_else(|| {
                "OCR service reported failure without a message".to_string()
            })),
            error_details: envelope.details,
            ..Default::default()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Project a normalized result onto the report shape
pub fn to_report(result: &InferenceResult) -> Report {
    match result {
        InferenceResult::Ocr(outcome) => ocr_report(outcome),
        InferenceResult::Verification(result) => verification_report(result),
    }
}

fn ocr_report(outcome: &OcrOutcome) -> Report {
    let result = &outcome.result;
    let mut report = Report::ocr(result.success);
    report.http_status = Some(outcome.status);

    if result.success {
        report.extracted_text = result.extracted_text.clone();
        report.document_type = result.document_type.clone();
        report.confidence = result.confidence;
        report.processing_time_ms = result.processing_time_ms;
        report.api_version = result.api_version.clone();
        report.structured_data = result.structured_data.clone();
    } else {
        report.failure_kind = Some(FailureKind::Application);
        report.error = result.error.clone();
        report.details = result.error_details.clone();
        report.processing_time_ms = result.processing_time_ms;
    }
    report
}

fn verification_report(result: &VerificationResult) -> Report {
    let mut report = Report::verification(result.success);

    if result.success {
        report.distance = result.distance;
        report.verified = result.verified;
        report.threshold = result.threshold;
        report.model_name = result.model_name.clone();
        report.detector_backend = result.detector_backend.clone();
    } else {
        report.failure_kind = Some(FailureKind::Backend);
        report.error = result.error.clone();
    }
    report
}

/// Report for an OCR invocation that never produced a result
pub fn error_report(err: &PipelineError) -> Report {
    let mut report = Report::ocr(false);
    report.failure_kind = Some(err.failure_kind());
    report.error = Some(err.to_string());
    report
}

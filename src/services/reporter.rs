use crate::models::report::{BatchReport, Report, ReportKind};
use std::fmt::Write as _;

const RULE_WIDTH: usize = 50;
const SECTION_WIDTH: usize = 30;

/// Human-readable rendering of a single report
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);
    let section = "-".repeat(SECTION_WIDTH);

    let _ = writeln!(out, "{}", rule);
    match report.http_status {
        Some(status) => {
            let _ = writeln!(out, "HTTP Status: {}", status);
        }
        None => {
            let _ = writeln!(out, "{}", kind_label(report.kind));
        }
    }
    let _ = writeln!(out, "{}", rule);

    if !report.success {
        let _ = writeln!(out, "FAILED: {}", failure_label(report.kind));
        let _ = writeln!(out, "Error: {}", report.error.as_deref().unwrap_or("N/A"));
        if let Some(details) = &report.details {
            let _ = writeln!(out, "Details: {}", pretty(details));
        }
        return out;
    }

    match report.kind {
        ReportKind::Ocr => {
            let _ = writeln!(out, "OCR succeeded");
            let processing_time = report.processing_time_ms.map(|t| format!("{}ms", t));
            let confidence = report.confidence.map(|c| format!("{:.1}%", c * 100.0));
            let _ = writeln!(out, "Processing time: {}", or_na(processing_time));
            let _ = writeln!(out, "Confidence: {}", or_na(confidence));
            let api_version = report.api_version.as_deref().unwrap_or("N/A");
            let _ = writeln!(out, "API version: {}", api_version);
            if let Some(document_type) = &report.document_type {
                let _ = writeln!(out, "Document type: {}", document_type);
            }
            let _ = writeln!(out);
            let _ = writeln!(out, "Extracted text:");
            let _ = writeln!(out, "{}", section);
            let _ = writeln!(out, "{}", report.extracted_text.as_deref().unwrap_or("N/A"));

            if let Some(structured) = &report.structured_data {
                let _ = writeln!(out);
                let _ = writeln!(out, "Structured data:");
                let _ = writeln!(out, "{}", section);
                let _ = writeln!(out, "{}", pretty(&serde_json::Value::Object(structured.clone())));
            }
        }
        ReportKind::Verification => {
            let verdict = match report.verified {
                Some(true) => "same person",
                Some(false) => "different person",
                None => "N/A",
            };
            let _ = writeln!(out, "Verification completed");
            let _ = writeln!(out, "Verdict: {}", verdict);
            let _ = writeln!(out, "Distance: {}", or_na(report.distance.map(|d| d.to_string())));
            let _ = writeln!(out, "Threshold: {}", or_na(report.threshold.map(|t| t.to_string())));
            let _ = writeln!(out, "Model: {}", report.model_name.as_deref().unwrap_or("N/A"));
            let detector = report.detector_backend.as_deref().unwrap_or("N/A");
            let _ = writeln!(out, "Detector: {}", detector);
        }
    }

    out
}

/// Machine-readable rendering: a single JSON object
pub fn to_json(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string(report)
}

pub fn batch_to_json(batch: &BatchReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(batch)
}

/// One block per item, then the summary line
pub fn render_batch_text(batch: &BatchReport) -> String {
    let mut out = String::new();
    for item in &batch.items {
        let _ = writeln!(out, "--- {} ---", item.path);
        out.push_str(&render_text(&item.report));
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    }
    let _ = writeln!(
        out,
        "Finished {}: {} total, {} succeeded, {} failed",
        batch.finished_at.format("%Y-%m-%d %H:%M:%S"),
        batch.summary.total,
        batch.summary.succeeded,
        batch.summary.failed
    );
    out
}

fn kind_label(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Ocr => "OCR",
        ReportKind::Verification => "Face verification",
    }
}

fn failure_label(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Ocr => "OCR processing failed",
        ReportKind::Verification => "face verification failed",
    }
}

fn or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| "N/A".to_string())
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

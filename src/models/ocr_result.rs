use crate::models::image_payload::ImagePayload;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// OCR request: an encoded image plus an optional instruction for the service
#[derive(Debug, Clone, PartialEq)]
pub struct OcrRequest {
    pub payload: ImagePayload,
    pub prompt: Option<String>,
    /// Also send the payload's MIME type as an explicit `mimeType` field
    pub send_mime_type: bool,
}

impl OcrRequest {
    pub fn new(payload: ImagePayload) -> Self {
        Self {
            payload,
            prompt: None,
            send_mime_type: false,
        }
    }

    /// Attach a prompt. Empty prompts are dropped, the service treats them as absent.
    pub fn with_prompt(mut self, prompt: Option<String>) -> Self {
        self.prompt = prompt.filter(|p| !p.is_empty());
        self
    }

    pub fn with_mime_type_hint(mut self) -> Self {
        self.send_mime_type = true;
        self
    }
}

/// JSON body sent to the OCR endpoint
#[derive(Debug, Serialize)]
pub struct OcrRequestBody<'a> {
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<&'a str>,
    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<&'static str>,
}

/// `data` section of a successful OCR envelope
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OcrData {
    pub extracted_text: Option<String>,
    pub document_type: Option<String>,
    pub confidence: Option<f64>,
    pub processing_time: Option<u64>,
    pub api_version: Option<String>,
    pub structured_data: Option<Value>,
}

impl OcrData {
    /// Read the `data` object field by field. A field of the wrong type is
    /// coerced when it is a numeric string, otherwise treated as absent.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(Self {
            extracted_text: string_field(object, "extractedText"),
            document_type: string_field(object, "documentType"),
            confidence: number_field(object, "confidence"),
            processing_time: millis_field(object, "processingTime"),
            api_version: string_field(object, "apiVersion"),
            structured_data: object.get("structuredData").filter(|v| !v.is_null()).cloned(),
        })
    }
}

/// Top-level response envelope returned by the OCR service for any status code
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OcrEnvelope {
    pub success: bool,
    pub data: Option<OcrData>,
    pub error: Option<String>,
    pub details: Option<Value>,
    /// Present on some failure envelopes
    pub processing_time: Option<u64>,
}

impl OcrEnvelope {
    /// Best-effort read of any JSON body.
    ///
    /// `success` holds only for a literal `true`. A body that is not an
    /// object yields an empty failure envelope.
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        Self {
            success: object.get("success").and_then(Value::as_bool) == Some(true),
            data: object.get("data").and_then(OcrData::from_json),
            error: string_field(object, "error"),
            details: object.get("details").filter(|v| !v.is_null()).cloned(),
            processing_time: millis_field(object, "processingTime"),
        }
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

fn number_field(object: &Map<String, Value>, key: &str) -> Option<f64> {
    let number = match object.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn millis_field(object: &Map<String, Value>, key: &str) -> Option<u64> {
    number_field(object, key)
        .filter(|n| *n >= 0.0)
        .map(|n| n.round() as u64)
}

/// Normalized OCR outcome
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OcrResult {
    pub success: bool,
    pub extracted_text: Option<String>,
    pub document_type: Option<String>,
    pub confidence: Option<f64>,
    pub processing_time_ms: Option<u64>,
    pub api_version: Option<String>,
    pub structured_data: Option<Map<String, Value>>,
    pub error: Option<String>,
    pub error_details: Option<Value>,
}

/// OCR result paired with the HTTP status the service answered with
#[derive(Debug, Clone, PartialEq)]
pub struct OcrOutcome {
    pub result: OcrResult,
    pub status: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::image_payload::MimeType;

    #[test]
    fn test_empty_prompt_is_dropped() {
        let payload = ImagePayload::new(MimeType::Png, vec![1, 2, 3]);
        let request = OcrRequest::new(payload.clone()).with_prompt(Some(String::new()));
        assert_eq!(request.prompt, None);

        let request = OcrRequest::new(payload).with_prompt(Some("extract the name".to_string()));
        assert_eq!(request.prompt.as_deref(), Some("extract the name"));
    }

    #[test]
    fn test_request_body_omits_absent_fields() {
        let body = OcrRequestBody {
            image: "data:image/png;base64,AAAA".to_string(),
            prompt: None,
            mime_type: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "image": "data:image/png;base64,AAAA" }));

        let body = OcrRequestBody {
            image: "data:image/png;base64,AAAA".to_string(),
            prompt: Some("read it"),
            mime_type: Some("image/png"),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["prompt"], "read it");
        assert_eq!(json["mimeType"], "image/png");
    }

    #[test]
    fn test_envelope_parses_success_shape() {
        let envelope = OcrEnvelope::from_json(&serde_json::json!({
            "success": true,
            "data": {
                "extractedText": "Hello",
                "documentType": "driver_license",
                "confidence": 0.97,
                "processingTime": 120,
                "apiVersion": "1.0"
            }
        }));
        assert!(envelope.success);
        let data = envelope.data.unwrap();
        assert_eq!(data.extracted_text.as_deref(), Some("Hello"));
        assert_eq!(data.document_type.as_deref(), Some("driver_license"));
        assert_eq!(data.confidence, Some(0.97));
        assert_eq!(data.processing_time, Some(120));
        assert_eq!(data.api_version.as_deref(), Some("1.0"));
    }

    #[test]
    fn test_envelope_missing_success_is_false() {
        let envelope = OcrEnvelope::from_json(&serde_json::json!({"error": "boom"}));
        assert!(!envelope.success);
        assert_eq!(envelope.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_envelope_tolerates_loose_types() {
        let envelope = OcrEnvelope::from_json(&serde_json::json!({
            "success": true,
            "data": {
                "extractedText": "Hello",
                "documentType": 7,
                "confidence": "high",
                "processingTime": "250",
                "apiVersion": null
            }
        }));
        assert!(envelope.success);
        let data = envelope.data.unwrap();
        assert_eq!(data.extracted_text.as_deref(), Some("Hello"));
        assert_eq!(data.document_type, None);
        assert_eq!(data.confidence, None);
        assert_eq!(data.processing_time, Some(250));
        assert_eq!(data.api_version, None);

        let data = OcrData::from_json(&serde_json::json!({"confidence": "0.9"})).unwrap();
        assert_eq!(data.confidence, Some(0.9));
    }

    #[test]
    fn test_envelope_success_requires_literal_true() {
        for raw in [
            serde_json::json!({"success": null, "error": "boom"}),
            serde_json::json!({"success": "true", "error": "boom"}),
            serde_json::json!({"success": 1, "error": "boom"}),
        ] {
            let envelope = OcrEnvelope::from_json(&raw);
            assert!(!envelope.success);
            assert_eq!(envelope.error.as_deref(), Some("boom"));
        }
    }

    #[test]
    fn test_non_object_body_is_empty_failure() {
        let envelope = OcrEnvelope::from_json(&serde_json::json!([1, 2, 3]));
        assert_eq!(envelope, OcrEnvelope::default());

        let raw = serde_json::json!({"success": true, "data": "text"});
        let envelope = OcrEnvelope::from_json(&raw);
        assert!(envelope.success);
        assert_eq!(envelope.data, None);
    }
}

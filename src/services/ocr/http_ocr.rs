use crate::error::{PipelineError, TransportError, TransportErrorKind};
use crate::models::config::OcrConfig;
use crate::models::ocr_result::{OcrEnvelope, OcrOutcome, OcrRequest, OcrRequestBody};
use crate::services::encoder;
use crate::services::normalizer;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Duration;

/// Blocking HTTP client for the OCR service
#[derive(Clone)]
pub struct HttpOcrClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl std::fmt::Debug for HttpOcrClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpOcrClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HttpOcrClient {
    /// Create a client for `endpoint`. Each call is bounded by `timeout`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, PipelineError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            TransportError::new(
                TransportErrorKind::Request,
                format!("Failed to create HTTP client: {}", e),
            )
        })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: None,
            timeout,
        })
    }

    /// Build from validated configuration
    pub fn from_config(config: &OcrConfig) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::Config)?;
        let client = Self::new(
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(client.with_api_key(config.api_key.clone()))
    }

    /// Send `Authorization: Bearer <key>` with every request
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn authorize(
        &self,
        builder: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    /// Submit one OCR request.
    ///
    /// The body is parsed whatever the status code; a non-2xx answer with a
    /// JSON body is a normal, reportable outcome. Only connection failures,
    /// timeouts and non-JSON bodies are errors. There is exactly one attempt.
    pub fn invoke(&self, request: &OcrRequest) -> Result<OcrOutcome, PipelineError> {
        let body = OcrRequestBody {
            image: encoder::to_data_uri(&request.payload),
            prompt: request.prompt.as_deref(),
            mime_type: request
                .send_mime_type
                .then(|| request.payload.mime_type().as_str()),
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            mime_type = %request.payload.mime_type(),
            image_bytes = request.payload.len(),
            has_prompt = request.prompt.is_some(),
            "sending OCR request"
        );

        let response = self
            .authorize(self.client.post(&self.endpoint))
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .map_err(|e| TransportError::from_reqwest(&e))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .map_err(|e| TransportError::from_reqwest(&e))?;

        let body: Value = serde_json::from_str(&text).map_err(|e| {
            TransportError::new(
                TransportErrorKind::MalformedBody,
                format!("HTTP {} response is not valid JSON: {}", status, e),
            )
        })?;

        let result = normalizer::normalize_ocr_envelope(OcrEnvelope::from_json(&body));

        if result.success {
            tracing::info!(
                status,
                processing_time_ms = ?result.processing_time_ms,
                "OCR succeeded"
            );
        } else {
            tracing::warn!(status, error = ?result.error, "OCR service reported failure");
        }

        Ok(OcrOutcome { result, status })
    }

    /// Fetch the service's self-description (`GET <endpoint>`)
    pub fn api_info(&self) -> Result<Value, PipelineError> {
        let response = self
            .authorize(self.client.get(&self.endpoint))
            .send()
            .map_err(|e| TransportError::from_reqwest(&e))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .map_err(|e| TransportError::from_reqwest(&e))?;

        serde_json::from_str(&text).map_err(|e| {
            TransportError::new(
                TransportErrorKind::MalformedBody,
                format!("HTTP {} API info is not valid JSON: {}", status, e),
            )
            .into()
        })
    }
}

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// OCR service connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OcrConfig {
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/api/ocr".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl OcrConfig {
    /// Validate endpoint URL and timeout
    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| format!("Invalid OCR endpoint '{}': {}", self.endpoint, e))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(format!(
                "OCR endpoint must use http or https, got '{}'",
                url.scheme()
            ));
        }

        if self.timeout_secs == 0 {
            return Err("OCR timeout must be greater than zero".to_string());
        }

        Ok(())
    }
}

/// Face verification backend settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerificationConfig {
    /// Interpreter used to run the helper script
    pub python: String,
    pub script: PathBuf,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            python: "python3".to_string(),
            script: PathBuf::from("resources/face_verify.py"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.level
            .parse::<tracing::Level>()
            .map(|_| ())
            .map_err(|_| format!("Invalid log level: {}", self.level))
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub ocr: OcrConfig,
    #[serde(default)]
    pub verification: VerificationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.ocr.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Copy safe for display, with the credential masked
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.ocr.api_key = copy.ocr.api_key.as_deref().map(redact_secret);
        copy
    }
}

/// Keep a short prefix so keys stay recognizable
fn redact_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 8 {
        "********".to_string()
    } else {
        format!("{}...****", prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();

        assert_eq!(config.ocr.endpoint, "http://localhost:3000/api/ocr");
        assert_eq!(config.ocr.timeout_secs, 30);
        assert!(config.ocr.api_key.is_none());

        assert_eq!(config.verification.python, "python3");
        assert_eq!(
            config.verification.script,
            PathBuf::from("resources/face_verify.py")
        );

        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_app_config_serialization() {
        let mut config = AppConfig::default();
        config.ocr.api_key = Some("dw_secret_token".to_string());
        let json = serde_json::to_string_pretty(&config).unwrap();

        let deserialized: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{"ocr":{"endpoint":"https://ocr.example.com/api/ocr","timeout_secs":10}}"#,
        )
        .unwrap();
        assert_eq!(config.ocr.timeout_secs, 10);
        assert_eq!(config.ocr.api_key, None);
        assert_eq!(config.verification, VerificationConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        let mut config = AppConfig::default();
        config.ocr.endpoint = "not a url".to_string();
        assert!(config.validate().is_err());

        config.ocr.endpoint = "ftp://example.com/ocr".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("http"), "got: {}", err);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = AppConfig::default();
        config.ocr.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());

        config.logging.level = "DEBUG".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_redacted_masks_api_key() {
        let mut config = AppConfig::default();
        config.ocr.api_key = Some("dw_46b3e6a8c920b0ed".to_string());

        let redacted = config.redacted();
        let key = redacted.ocr.api_key.unwrap();
        assert!(key.starts_with("dw_4"));
        assert!(!key.contains("c920b0ed"));

        config.ocr.api_key = Some("short".to_string());
        assert_eq!(config.redacted().ocr.api_key.as_deref(), Some("********"));
    }
}

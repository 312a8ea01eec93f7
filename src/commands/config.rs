use super::output::CommandOutput;
use crate::models::config::AppConfig;
use crate::services::config::ConfigManager;

/// Print the effective configuration with the credential masked
pub fn show_config(config: &AppConfig) -> Result<CommandOutput, String> {
    let json = serde_json::to_string_pretty(&config.redacted())
        .map_err(|e| format!("Failed to serialize config: {}", e))?;
    Ok(CommandOutput::ok(json))
}

pub fn config_path(manager: &ConfigManager) -> CommandOutput {
    CommandOutput::ok(manager.config_file_path().display().to_string())
}

/// Write a default config file unless one already exists
pub fn init_config(manager: &ConfigManager) -> Result<CommandOutput, String> {
    if manager.config_exists() {
        return Ok(CommandOutput::ok(format!(
            "Config already exists: {}",
            manager.config_file_path().display()
        )));
    }

    manager.save(&AppConfig::default())?;
    Ok(CommandOutput::ok(format!(
        "Wrote default config: {}",
        manager.config_file_path().display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_config_masks_key() {
        let mut config = AppConfig::default();
        config.ocr.api_key = Some("dw_46b3e6a8c920b0ed6ce2".to_string());

        let output = show_config(&config).unwrap();
        assert!(!output.stdout.contains("c920b0ed6ce2"));
        assert!(output.stdout.contains("timeout_secs"));
    }

    #[test]
    fn test_init_config_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::at(dir.path().join("config.json"));

        let first = init_config(&manager).unwrap();
        assert!(first.stdout.starts_with("Wrote default config"));
        assert!(manager.config_exists());

        let second = init_config(&manager).unwrap();
        assert!(second.stdout.starts_with("Config already exists"));
    }
}

//! Config command presentation: show and validate.

use crate::config::{SparksConfig, ValidationError};
use crate::error::ApiError;

/// Effective configuration as TOML, with the API key redacted.
pub fn format_config_text(config: &SparksConfig, source: &str) -> Result<String, ApiError> {
    let body = toml::to_string_pretty(&config.redacted())
        .map_err(|e| ApiError::ConfigError(format!("Failed to render configuration: {}", e)))?;
    let key_status = if config.provider.resolve_api_key().is_some() {
        "set"
    } else if config.provider.provider_type.requires_api_key() {
        "missing"
    } else {
        "not required"
    };
    Ok(format!(
        "# Source: {}\n# API key: {}\n\n{}",
        source, key_status, body
    ))
}

pub fn format_config_json(config: &SparksConfig) -> Result<String, ApiError> {
    serde_json::to_string_pretty(&config.redacted())
        .map_err(|e| ApiError::ConfigError(format!("Failed to render configuration: {}", e)))
}

pub fn format_validation_text(errors: &[ValidationError]) -> String {
    if errors.is_empty() {
        return "Configuration is valid".to_string();
    }
    let mut output = format!("Configuration has {} error(s):", errors.len());
    for error in errors {
        output.push_str(&format!("\n  - {}", error));
    }
    output
}

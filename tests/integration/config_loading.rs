//! Config files, validation, and the logging section.

use sparks::config::{ConfigLoader, ProviderType, ValidationError};
use tempfile::TempDir;

#[test]
fn test_explicit_file_with_every_section() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("sparks.custom.toml");
    std::fs::write(
        &path,
        r#"
[provider]
provider_type = "ollama"
model = "llama3.1"
endpoint = "http://localhost:11434"

[generation]
temperature = 0.8
max_tokens = 1024

[logging]
level = "info"
format = "json"
output = "file"
file = "/tmp/sparks.log"

[logging.modules]
"sparks::provider" = "debug"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(config.provider.provider_type, ProviderType::Ollama);
    assert_eq!(config.provider.endpoint.as_deref(), Some("http://localhost:11434"));
    assert_eq!(config.generation.max_tokens, 1024);
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.logging.modules["sparks::provider"], "debug");
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_values_are_all_reported() {
    let config = ConfigLoader::from_toml_str(
        r#"
[provider]
provider_type = "local"
model = "tiny"

[generation]
temperature = -1.0

[logging]
output = "stdout"
"#,
    )
    .unwrap();

    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 3);
    assert!(errors.iter().any(|e| matches!(e, ValidationError::Provider(m) if m.contains("endpoint"))));
    assert!(errors.iter().any(|e| matches!(e, ValidationError::Generation(_))));
    assert!(errors.iter().any(|e| matches!(e, ValidationError::Logging(m) if m.contains("stdout"))));
}

#[test]
fn test_unknown_provider_type_fails_to_load() {
    assert!(ConfigLoader::from_toml_str("[provider]\nprovider_type = \"carrier-pigeon\"\n").is_err());
}

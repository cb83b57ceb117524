//! Route table behavior with injected backend and clipboard.

use super::support::{standard_batch_json, MemoryClipboard, ScriptedBackend};
use clap::Parser;
use sparks::cli::{map_error, Cli, RunContext};
use sparks::config::SparksConfig;
use sparks::provider::GenerationBackend;
use sparks::ApiError;
use std::sync::Arc;
use tempfile::TempDir;

fn run(
    args: &[&str],
    backend: Arc<ScriptedBackend>,
    clipboard: Arc<MemoryClipboard>,
) -> Result<String, ApiError> {
    let cli = Cli::try_parse_from(args).unwrap();
    let backend: Arc<dyn GenerationBackend> = backend;
    let context =
        RunContext::with_parts(SparksConfig::default(), Some(backend), clipboard).unwrap();
    context.execute(&cli.command)
}

#[test]
fn test_generate_json_output() {
    let backend = ScriptedBackend::replying(&[&standard_batch_json()]);
    let output = run(
        &["sparks", "generate", "--vibe", "chill", "--format", "json"],
        backend.clone(),
        MemoryClipboard::new(),
    )
    .unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["questions"].as_array().unwrap().len(), 8);
    assert_eq!(backend.call_count(), 1);
    assert!(backend.prompts()[0].contains("Vibe: chill"));
}

#[test]
fn test_generate_without_context_is_refused() {
    let backend = ScriptedBackend::replying(&[&standard_batch_json()]);
    let err = run(&["sparks", "generate"], backend.clone(), MemoryClipboard::new()).unwrap_err();
    assert!(matches!(err, ApiError::EmptyContext));
    assert_eq!(backend.call_count(), 0);
    assert_eq!(
        map_error(&err),
        "Please provide at least some context about your group"
    );
}

#[test]
fn test_generate_from_link_with_avoid_file_and_copy() {
    let temp = TempDir::new().unwrap();
    let avoid = temp.path().join("seen.txt");
    std::fs::write(&avoid, "Already asked?\n").unwrap();

    let backend = ScriptedBackend::replying(&[&standard_batch_json()]);
    let clipboard = MemoryClipboard::new();
    let output = run(
        &[
            "sparks",
            "generate",
            "--link",
            "https://sparks.example/?closeness=family",
            "--avoid",
            avoid.to_str().unwrap(),
            "--format",
            "export",
            "--copy",
        ],
        backend.clone(),
        clipboard.clone(),
    )
    .unwrap();

    let prompt = &backend.prompts()[0];
    assert!(prompt.contains("Closeness Level: family"));
    assert!(prompt.contains("- Already asked?"));
    assert!(output.contains("Closeness Level: Family"));
    assert_eq!(clipboard.last().as_deref(), Some(output.as_str()));
}

#[test]
fn test_export_saved_batch() {
    let temp = TempDir::new().unwrap();
    let saved = temp.path().join("batch.json");
    std::fs::write(
        &saved,
        r#"{"questions":[{"text":"Saved?","difficulty":"connection"}]}"#,
    )
    .unwrap();

    let output = run(
        &["sparks", "export", "--questions", saved.to_str().unwrap()],
        ScriptedBackend::new(),
        MemoryClipboard::new(),
    )
    .unwrap();
    assert!(output.contains("🤝 Connection\nSaved?"));
}

#[test]
fn test_link_command() {
    let output = run(
        &["sparks", "link", "--group-size", "4-6", "--interests", "hiking & maps"],
        ScriptedBackend::new(),
        MemoryClipboard::new(),
    )
    .unwrap();
    assert_eq!(output, "groupSize=4-6&interests=hiking+%26+maps");

    let output = run(
        &["sparks", "link", "--vibe", "cozy", "--base-url", "https://sparks.example/"],
        ScriptedBackend::new(),
        MemoryClipboard::new(),
    )
    .unwrap();
    assert_eq!(output, "https://sparks.example/?vibe=cozy");
}

#[test]
fn test_config_show_and_validate() {
    let output = run(
        &["sparks", "config", "show", "--format", "json"],
        ScriptedBackend::new(),
        MemoryClipboard::new(),
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["provider"]["model"], "gpt-4o");

    let output = run(
        &["sparks", "config", "validate"],
        ScriptedBackend::new(),
        MemoryClipboard::new(),
    )
    .unwrap();
    assert_eq!(output, "Configuration is valid");
}

#[test]
fn test_generate_output_survives_clipboard_failure() {
    let backend = ScriptedBackend::replying(&[&standard_batch_json()]);
    let output = run(
        &["sparks", "generate", "--vibe", "chill", "--format", "json", "--copy"],
        backend.clone(),
        MemoryClipboard::failing(),
    )
    .unwrap();

    assert_eq!(backend.call_count(), 1);
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["questions"].as_array().unwrap().len(), 8);
}

#[test]
fn test_export_output_survives_clipboard_failure() {
    let temp = TempDir::new().unwrap();
    let saved = temp.path().join("batch.json");
    std::fs::write(
        &saved,
        r#"{"questions":[{"text":"Kept?","difficulty":"deep"}]}"#,
    )
    .unwrap();

    let output = run(
        &["sparks", "export", "--questions", saved.to_str().unwrap(), "--copy"],
        ScriptedBackend::new(),
        MemoryClipboard::failing(),
    )
    .unwrap();
    assert!(output.contains("🌊 Deep\nKept?"));
}

//! Clipboard seam.
//!
//! The system implementation pipes text into the first platform clipboard
//! utility that runs successfully.

use crate::error::ApiError;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str) -> Result<(), ApiError>;
}

/// Clipboard backed by platform command-line utilities.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    candidates: Vec<Vec<String>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let candidates: &[&[&str]] = if cfg!(target_os = "macos") {
            &[&["pbcopy"]]
        } else if cfg!(target_os = "windows") {
            &[&["clip"]]
        } else {
            &[
                &["wl-copy"],
                &["xclip", "-selection", "clipboard"],
                &["xsel", "--clipboard", "--input"],
            ]
        };
        Self::with_commands(
            candidates
                .iter()
                .map(|cmd| cmd.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    /// Use an explicit list of commands (program followed by arguments).
    pub fn with_commands(candidates: Vec<Vec<String>>) -> Self {
        Self { candidates }
    }

    fn try_command(argv: &[String], text: &str) -> Result<(), String> {
        let (program, args) = argv.split_first().ok_or("empty command")?;
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| format!("{}: {}", program, e))?;

        // stdin is dropped before waiting so the tool sees EOF.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };

        let waited = child.wait();
        written.map_err(|e| format!("{}: {}", program, e))?;
        let status = waited.map_err(|e| format!("{}: {}", program, e))?;
        if status.success() {
            Ok(())
        } else {
            Err(format!("{} exited with {}", program, status))
        }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<(), ApiError> {
        let mut failures = Vec::new();
        for argv in &self.candidates {
            match Self::try_command(argv, text) {
                Ok(()) => {
                    debug!(command = %argv.join(" "), bytes = text.len(), "Copied to clipboard");
                    return Ok(());
                }
                Err(reason) => failures.push(reason),
            }
        }
        Err(ApiError::ClipboardFailed(if failures.is_empty() {
            "no clipboard utility configured".to_string()
        } else {
            failures.join("; ")
        }))
    }
}

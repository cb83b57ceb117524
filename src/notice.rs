//! Transient user-facing notifications.
//!
//! Every triggering action ends in exactly one [`Notice`]; failures are
//! converted here instead of propagating out of the session.

use crate::error::ApiError;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }

    /// User-facing message for a failed action. Backend and malformed
    /// response failures share one message.
    pub fn from_error(error: &ApiError) -> Self {
        match error {
            ApiError::EmptyContext => {
                Notice::error("Please provide at least some context about your group")
            }
            ApiError::GenerationInFlight => {
                Notice::info("Still working on the current questions, hang tight")
            }
            ApiError::ClipboardFailed(_) => Notice::error("Failed to copy"),
            ApiError::InvalidLink(_) => Notice::error("That share link could not be read"),
            ApiError::InvalidInput(detail) => Notice::error(detail.clone()),
            ApiError::ProviderNotConfigured(detail) => {
                Notice::error(format!("Generation is not configured: {}", detail))
            }
            ApiError::ConfigError(_) => Notice::error(error.to_string()),
            ApiError::MalformedResponse(_)
            | ApiError::ProviderError(_)
            | ApiError::ProviderRequestFailed(_)
            | ApiError::ProviderAuthFailed(_)
            | ApiError::ProviderRateLimit(_)
            | ApiError::ProviderModelNotFound(_)
            | ApiError::Io(_) => Notice::error("Failed to generate questions. Please try again."),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

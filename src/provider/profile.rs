//! Provider profile: the configured provider type, model, endpoint and
//! credentials, and their resolution into a [`ModelProvider`].

use crate::error::ApiError;
use crate::provider::ModelProvider;
use serde::{Deserialize, Serialize};
use url::Url;

/// Supported provider families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    OpenAI,
    Anthropic,
    Ollama,
    Local,
}

impl ProviderType {
    /// Conventional environment variable holding the API key, if the
    /// provider needs one.
    pub fn default_api_key_env(self) -> Option<&'static str> {
        match self {
            ProviderType::OpenAI => Some("OPENAI_API_KEY"),
            ProviderType::Anthropic => Some("ANTHROPIC_API_KEY"),
            ProviderType::Ollama | ProviderType::Local => None,
        }
    }

    pub fn requires_api_key(self) -> bool {
        matches!(self, ProviderType::OpenAI | ProviderType::Anthropic)
    }
}

impl std::str::FromStr for ProviderType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ProviderType::OpenAI),
            "anthropic" => Ok(ProviderType::Anthropic),
            "ollama" => Ok(ProviderType::Ollama),
            "local" | "local-custom" => Ok(ProviderType::Local),
            other => Err(ApiError::ConfigError(format!(
                "Unknown provider type: {} (expected openai, anthropic, ollama or local)",
                other
            ))),
        }
    }
}

pub fn provider_type_slug(provider_type: ProviderType) -> &'static str {
    match provider_type {
        ProviderType::OpenAI => "openai",
        ProviderType::Anthropic => "anthropic",
        ProviderType::Ollama => "ollama",
        ProviderType::Local => "local",
    }
}

/// Provider section of the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub provider_type: ProviderType,
    pub model: String,
    /// Inline API key. Prefer `api_key_env` for anything checked in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Name of the environment variable holding the API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: ProviderType::OpenAI,
            model: DEFAULT_OPENAI_MODEL.to_string(),
            api_key: None,
            api_key_env: None,
            endpoint: None,
        }
    }
}

impl ProviderConfig {
    /// Check model and endpoint shape. Credentials are checked at
    /// resolution time because they may come from the environment.
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model name cannot be empty".to_string());
        }
        if let Some(endpoint) = &self.endpoint {
            Url::parse(&normalize_endpoint(endpoint))
                .map_err(|e| format!("Invalid endpoint URL '{}': {}", endpoint, e))?;
        }
        if self.provider_type == ProviderType::Local && self.endpoint.is_none() {
            return Err("Local providers require an endpoint".to_string());
        }
        Ok(())
    }

    /// Resolve the API key: inline value, then `api_key_env`, then the
    /// provider's conventional variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.is_empty()) {
            return Some(key.clone());
        }
        let env_name = self
            .api_key_env
            .as_deref()
            .or_else(|| self.provider_type.default_api_key_env())?;
        std::env::var(env_name).ok().filter(|k| !k.is_empty())
    }

    /// Convert into a fully resolved [`ModelProvider`].
    pub fn to_model_provider(&self) -> Result<ModelProvider, ApiError> {
        self.validate().map_err(ApiError::ConfigError)?;
        let endpoint = self.endpoint.as_deref().map(normalize_endpoint);
        let api_key = self.resolve_api_key();

        if self.provider_type.requires_api_key() && api_key.is_none() {
            let hint = self
                .api_key_env
                .as_deref()
                .or_else(|| self.provider_type.default_api_key_env())
                .unwrap_or("api_key");
            return Err(ApiError::ProviderNotConfigured(format!(
                "No API key for {} provider (set {} or provider.api_key)",
                provider_type_slug(self.provider_type),
                hint
            )));
        }

        let model = self.model.clone();
        Ok(match self.provider_type {
            ProviderType::OpenAI => ModelProvider::OpenAI {
                model,
                api_key: api_key.unwrap_or_default(),
                base_url: endpoint,
            },
            ProviderType::Anthropic => ModelProvider::Anthropic {
                model,
                api_key: api_key.unwrap_or_default(),
                base_url: endpoint,
            },
            ProviderType::Ollama => ModelProvider::Ollama {
                model,
                base_url: endpoint,
            },
            ProviderType::Local => ModelProvider::LocalCustom {
                model,
                endpoint: endpoint.unwrap_or_default(),
                api_key,
            },
        })
    }

    /// Copy safe to print: inline API key masked.
    pub fn redacted(&self) -> Self {
        Self {
            api_key: self.api_key.as_ref().map(|_| "********".to_string()),
            ..self.clone()
        }
    }
}

/// Add a scheme to bare `host:port/path` endpoints: `http://` for loopback
/// hosts, `https://` otherwise.
pub fn normalize_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim();
    if trimmed.contains("://") {
        return trimmed.to_string();
    }
    let is_loopback = ["localhost", "127.0.0.1", "[::1]"]
        .iter()
        .any(|host| trimmed.starts_with(host));
    if is_loopback {
        format!("http://{}", trimmed)
    } else {
        format!("https://{}", trimmed)
    }
}

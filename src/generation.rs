//! Generation Contract
//!
//! Turns a [`GenerationRequest`] into a validated [`QuestionBatch`]: refuse
//! empty contexts, issue exactly one backend call, and accept the response
//! only if it is a JSON object whose `questions` array holds well-formed
//! question records.

use crate::error::ApiError;
use crate::prompt::GenerationRequest;
use crate::provider::GenerationBackend;
use crate::question::{Difficulty, Question, QuestionBatch};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Parse backend output strictly. The text must be a single JSON object
/// with a non-empty `questions` array; every element needs a non-blank
/// string `text` and a `difficulty` from the closed set. Any violation
/// rejects the whole batch.
pub fn parse_response(raw: &str) -> Result<QuestionBatch, ApiError> {
    let document: Value = serde_json::from_str(raw)
        .map_err(|e| ApiError::MalformedResponse(format!("response is not valid JSON: {}", e)))?;

    let entries = match document.get("questions") {
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(ApiError::MalformedResponse(format!(
                "\"questions\" must be an array, got {}",
                json_kind(other)
            )))
        }
        None => {
            return Err(ApiError::MalformedResponse(
                "missing \"questions\" key".to_string(),
            ))
        }
    };

    if entries.is_empty() {
        return Err(ApiError::MalformedResponse(
            "\"questions\" array is empty".to_string(),
        ));
    }

    let questions = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_question(index, entry))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QuestionBatch::new(questions))
}

fn parse_question(index: usize, entry: &Value) -> Result<Question, ApiError> {
    let text = match entry.get("text") {
        Some(Value::String(text)) if !text.trim().is_empty() => text.clone(),
        Some(Value::String(_)) => {
            return Err(ApiError::MalformedResponse(format!(
                "question {} has empty text",
                index
            )))
        }
        _ => {
            return Err(ApiError::MalformedResponse(format!(
                "question {} has no string \"text\"",
                index
            )))
        }
    };

    let difficulty = match entry.get("difficulty") {
        Some(Value::String(name)) => name.parse::<Difficulty>().map_err(|e| {
            ApiError::MalformedResponse(format!("question {}: {}", index, e))
        })?,
        _ => {
            return Err(ApiError::MalformedResponse(format!(
                "question {} has no string \"difficulty\"",
                index
            )))
        }
    };

    Ok(Question { text, difficulty })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Stateless contract over an injected backend.
#[derive(Clone)]
pub struct QuestionGenerator {
    backend: Arc<dyn GenerationBackend>,
}

impl QuestionGenerator {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Arc<dyn GenerationBackend> {
        &self.backend
    }

    /// Run one generation end to end. No retries.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<QuestionBatch, ApiError> {
        if request.context().is_empty() {
            return Err(ApiError::EmptyContext);
        }

        let prompt = request.render_prompt();
        debug!(
            backend = %self.backend.describe(),
            prompt_len = prompt.len(),
            exclusions = request.exclusions().len(),
            "Requesting questions"
        );

        let raw = self.backend.generate(&prompt).await.map_err(|e| {
            warn!(backend = %self.backend.describe(), error = %e, "Generation backend failed");
            e
        })?;

        let batch = parse_response(&raw).map_err(|e| {
            warn!(error = %e, response_len = raw.len(), "Rejected malformed generation response");
            e
        })?;

        for (difficulty, expected, actual) in request.mix().mismatches(&batch) {
            warn!(
                difficulty = %difficulty,
                expected,
                actual,
                "Generated batch does not match requested mix"
            );
        }

        Ok(batch)
    }
}

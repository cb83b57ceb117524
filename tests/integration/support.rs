//! Shared test doubles: a scripted generation backend and an in-memory
//! clipboard.

use async_trait::async_trait;
use parking_lot::Mutex;
use sparks::clipboard::Clipboard;
use sparks::provider::GenerationBackend;
use sparks::ApiError;
use std::collections::VecDeque;
use std::sync::Arc;

/// One scripted reply.
pub enum Reply {
    Text(String),
    Fail(ApiError),
}

/// Replays scripted replies in order and records every prompt it receives.
/// Once the script runs out, the last reply is not repeated; calls fail.
#[derive(Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Reply>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn replying(texts: &[&str]) -> Arc<Self> {
        let backend = Self::new();
        for text in texts {
            backend.push_text(text);
        }
        backend
    }

    pub fn push_text(&self, text: &str) {
        self.replies.lock().push_back(Reply::Text(text.to_string()));
    }

    pub fn push_failure(&self, error: ApiError) {
        self.replies.lock().push_back(Reply::Fail(error));
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().len()
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        self.prompts.lock().push(prompt.to_string());
        match self.replies.lock().pop_front() {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Fail(error)) => Err(error),
            None => Err(ApiError::ProviderError("script exhausted".to_string())),
        }
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

#[derive(Default)]
pub struct MemoryClipboard {
    copied: Mutex<Vec<String>>,
    fail: bool,
}

impl MemoryClipboard {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            copied: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn last(&self) -> Option<String> {
        self.copied.lock().last().cloned()
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&self, text: &str) -> Result<(), ApiError> {
        if self.fail {
            return Err(ApiError::ClipboardFailed("clipboard unavailable".to_string()));
        }
        self.copied.lock().push(text.to_string());
        Ok(())
    }
}

/// A valid response holding the standard eight-question mix.
pub fn standard_batch_json() -> String {
    let questions = [
        ("What's the best thing you ate this week?", "icebreaker"),
        ("Which app do you open first in the morning?", "icebreaker"),
        ("What hobby would you pick up with unlimited time?", "intermediate"),
        ("What's a skill you're quietly proud of?", "intermediate"),
        ("Which place feels most like home to you?", "intermediate"),
        ("What belief of yours has changed the most?", "deep"),
        ("What do you wish people asked you about?", "deep"),
        ("What's something this group has taught you?", "connection"),
    ];
    let entries: Vec<serde_json::Value> = questions
        .iter()
        .map(|(text, difficulty)| serde_json::json!({ "text": text, "difficulty": difficulty }))
        .collect();
    serde_json::json!({ "questions": entries }).to_string()
}

//! Sparks: Conversation Starters for a Described Group
//!
//! Describe a gathering (group size, ages, vibe, interests, closeness), get a
//! batch of conversation questions graded from light icebreakers to deeper
//! connection prompts, and share them as a link or a plain-text block.

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod context;
pub mod error;
pub mod export;
pub mod generation;
pub mod logging;
pub mod notice;
pub mod prompt;
pub mod provider;
pub mod question;
pub mod session;

pub use context::{ContextField, SocialContext};
pub use error::ApiError;
pub use question::{Difficulty, Question, QuestionBatch};
pub use session::{GenerationKind, GenerationOutcome, Session};

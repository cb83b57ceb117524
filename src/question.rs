//! Question records and the batch the session holds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of difficulty levels. Anything else coming back from a
/// backend is a malformed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Icebreaker,
    Intermediate,
    Deep,
    Connection,
}

impl Difficulty {
    /// Display and grouping order.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Icebreaker,
        Difficulty::Intermediate,
        Difficulty::Deep,
        Difficulty::Connection,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Icebreaker => "icebreaker",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Deep => "deep",
            Difficulty::Connection => "connection",
        }
    }

    /// Badge label for a single question.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Icebreaker => "Icebreaker",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Deep => "Deep",
            Difficulty::Connection => "Connection",
        }
    }

    /// Short description used in the generation instruction.
    pub fn guidance(self) -> &'static str {
        match self {
            Difficulty::Icebreaker => "light, easy, fun",
            Difficulty::Intermediate => "more engaging, thoughtful",
            Difficulty::Deep => "philosophical, introspective, meaningful",
            Difficulty::Connection => {
                "requires relationship history to answer, builds connection between the people present"
            }
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the four difficulty names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDifficulty(pub String);

impl fmt::Display for UnknownDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown difficulty '{}'", self.0)
    }
}

impl std::error::Error for UnknownDifficulty {}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownDifficulty(s.to_string()))
    }
}

/// A single conversation question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub difficulty: Difficulty,
}

impl Question {
    pub fn new(text: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            text: text.into(),
            difficulty,
        }
    }
}

/// A complete, validated set of questions from one generation.
///
/// Serializes as `{"questions": [...]}`, the same shape the backend is asked
/// to return.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBatch {
    questions: Vec<Question>,
}

impl QuestionBatch {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Question texts, in batch order. Used as the exclusion list for a
    /// follow-up generation.
    pub fn texts(&self) -> Vec<String> {
        self.questions.iter().map(|q| q.text.clone()).collect()
    }

    /// Questions of one difficulty, in batch order.
    pub fn of(&self, difficulty: Difficulty) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.difficulty == difficulty)
            .collect()
    }

    /// Non-empty difficulty groups in [`Difficulty::ALL`] order.
    pub fn grouped(&self) -> Vec<(Difficulty, Vec<&Question>)> {
        Difficulty::ALL
            .into_iter()
            .map(|d| (d, self.of(d)))
            .filter(|(_, group)| !group.is_empty())
            .collect()
    }

    pub fn count(&self, difficulty: Difficulty) -> usize {
        self.questions
            .iter()
            .filter(|q| q.difficulty == difficulty)
            .count()
    }
}

impl IntoIterator for QuestionBatch {
    type Item = Question;
    type IntoIter = std::vec::IntoIter<Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.into_iter()
    }
}

//! Generation request and instruction rendering.
//!
//! Builds the natural-language instruction sent to the backend from a
//! social context snapshot and an optional list of prior questions to avoid.

use crate::context::{ContextField, SocialContext};
use crate::question::{Difficulty, QuestionBatch};

pub const FALLBACK_GROUP_SIZE: &str = "not specified";
pub const FALLBACK_AGE_RANGE: &str = "not specified";
pub const FALLBACK_VIBE: &str = "casual";
pub const FALLBACK_INTERESTS: &str = "general";
pub const FALLBACK_CLOSENESS: &str = "acquaintances";

const FACILITATOR_PREAMBLE: &str = "You are a thoughtful conversation facilitator.";

const QUALITY_CONSTRAINTS: [&str; 4] = [
    "Contextually appropriate for the group",
    "Open-ended and encourage discussion",
    "Respectful and inclusive",
    "Interesting and thought-provoking",
];

/// Value substituted into the instruction when a field was left empty.
pub fn fallback_for(field: ContextField) -> &'static str {
    match field {
        ContextField::GroupSize => FALLBACK_GROUP_SIZE,
        ContextField::AgeRange => FALLBACK_AGE_RANGE,
        ContextField::Vibe => FALLBACK_VIBE,
        ContextField::Interests => FALLBACK_INTERESTS,
        ContextField::Closeness => FALLBACK_CLOSENESS,
    }
}

/// Per-difficulty question counts requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionMix {
    pub icebreaker: usize,
    pub intermediate: usize,
    pub deep: usize,
    pub connection: usize,
}

impl QuestionMix {
    /// 2 icebreaker, 3 intermediate, 2 deep, 1 connection.
    pub const STANDARD: QuestionMix = QuestionMix {
        icebreaker: 2,
        intermediate: 3,
        deep: 2,
        connection: 1,
    };

    pub fn count(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Icebreaker => self.icebreaker,
            Difficulty::Intermediate => self.intermediate,
            Difficulty::Deep => self.deep,
            Difficulty::Connection => self.connection,
        }
    }

    pub fn total(&self) -> usize {
        Difficulty::ALL.into_iter().map(|d| self.count(d)).sum()
    }

    /// Difficulties whose count in `batch` differs from the requested mix,
    /// as (difficulty, expected, actual).
    pub fn mismatches(&self, batch: &QuestionBatch) -> Vec<(Difficulty, usize, usize)> {
        Difficulty::ALL
            .into_iter()
            .map(|d| (d, self.count(d), batch.count(d)))
            .filter(|(_, expected, actual)| expected != actual)
            .collect()
    }
}

impl Default for QuestionMix {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Transient request: a context snapshot plus prior question texts to avoid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    context: SocialContext,
    exclude: Vec<String>,
    mix: QuestionMix,
}

impl GenerationRequest {
    pub fn new(context: &SocialContext) -> Self {
        Self {
            context: context.clone(),
            exclude: Vec::new(),
            mix: QuestionMix::STANDARD,
        }
    }

    /// "Generate more" variant: the backend is told to avoid these texts.
    pub fn with_exclusions(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn with_mix(mut self, mix: QuestionMix) -> Self {
        self.mix = mix;
        self
    }

    pub fn context(&self) -> &SocialContext {
        &self.context
    }

    pub fn exclusions(&self) -> &[String] {
        &self.exclude
    }

    pub fn mix(&self) -> QuestionMix {
        self.mix
    }

    pub fn is_follow_up(&self) -> bool {
        !self.exclude.is_empty()
    }

    /// Field value as it appears in the instruction: the literal value, or
    /// the field's fallback when empty.
    pub fn rendered_value(&self, field: ContextField) -> &str {
        match self.context.get(field) {
            "" => fallback_for(field),
            value => value,
        }
    }

    /// Full instruction text for the backend.
    pub fn render_prompt(&self) -> String {
        let mut prompt = format!(
            "{} Generate exactly {} conversation questions based on the following social context:\n\n",
            FACILITATOR_PREAMBLE,
            self.mix.total()
        );

        for field in ContextField::ALL {
            prompt.push_str(&format!("{}: {}\n", field.label(), self.rendered_value(field)));
        }

        prompt.push_str("\nGenerate questions with varying difficulty levels:\n");
        for difficulty in Difficulty::ALL {
            let count = self.mix.count(difficulty);
            if count == 0 {
                continue;
            }
            prompt.push_str(&format!(
                "- {} {} question{} ({})\n",
                count,
                difficulty.as_str(),
                if count == 1 { "" } else { "s" },
                difficulty.guidance()
            ));
        }

        prompt.push_str("\nMake sure questions are:\n");
        for (i, constraint) in QUALITY_CONSTRAINTS.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", i + 1, constraint));
        }

        if self.is_follow_up() {
            prompt.push_str("\nThe group has already been asked these questions:\n");
            for text in &self.exclude {
                prompt.push_str(&format!("- {}\n", text));
            }
            prompt.push_str(
                "Do not repeat any of them and avoid their topics entirely. \
                 Be more creative and unconventional than the questions above.\n",
            );
        }

        let allowed: Vec<String> = Difficulty::ALL
            .into_iter()
            .map(|d| format!("\"{}\"", d.as_str()))
            .collect();
        prompt.push_str(&format!(
            "\nReturn the result as a valid JSON object with a single property called \"questions\" \
             that contains an array of question objects. Each question object should have \"text\" \
             (the question) and \"difficulty\" (one of: {}). Respond with JSON only.\n",
            allowed.join(", ")
        ));
        prompt.push_str(
            "\nFormat:\n{\n\"questions\": [\n{\"text\": \"question text here\", \"difficulty\": \"icebreaker\"},\n...more questions\n]\n}",
        );

        prompt
    }
}

//! Plain-text export for pasting into chat apps.

use crate::context::SocialContext;
use crate::question::{Difficulty, QuestionBatch};

pub const EXPORT_TITLE: &str = "💬 Conversation Sparks";
pub const EXPORT_ATTRIBUTION: &str = "✨ Generated with Conversation Sparks";

/// Section heading for a difficulty group.
pub fn group_heading(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Icebreaker => "🧊 Icebreakers",
        Difficulty::Intermediate => "💭 Intermediate",
        Difficulty::Deep => "🌊 Deep",
        Difficulty::Connection => "🤝 Connection",
    }
}

/// Render the shareable block: title, context summary, one section per
/// non-empty difficulty group, attribution. Groups with a single question
/// are rendered without numbering.
pub fn format_export(batch: &QuestionBatch, context: &SocialContext) -> String {
    let mut sections: Vec<String> = vec![EXPORT_TITLE.to_string()];

    let summary = context.summary();
    if !summary.is_empty() {
        let line = summary
            .iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join(" · ");
        sections.push(line);
    }

    for (difficulty, questions) in batch.grouped() {
        let mut section = String::from(group_heading(difficulty));
        if let [only] = questions.as_slice() {
            section.push('\n');
            section.push_str(&only.text);
        } else {
            for (i, question) in questions.iter().enumerate() {
                section.push_str(&format!("\n{}. {}", i + 1, question.text));
            }
        }
        sections.push(section);
    }

    sections.push(EXPORT_ATTRIBUTION.to_string());
    sections.join("\n\n")
}

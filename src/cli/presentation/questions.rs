//! Question batch and context presentation.

use crate::context::SocialContext;
use crate::error::ApiError;
use crate::question::{Difficulty, QuestionBatch};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use owo_colors::OwoColorize;

/// Bold, underlined heading when color is on.
pub fn format_section_heading(title: &str, color: bool) -> String {
    if color {
        format!("{}", title.bold().underline())
    } else {
        title.to_string()
    }
}

pub fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Icebreaker => Color::Cyan,
        Difficulty::Intermediate => Color::Green,
        Difficulty::Deep => Color::Blue,
        Difficulty::Connection => Color::Magenta,
    }
}

/// Questions in one table, grouped by difficulty. The `#` column is the
/// question's position in the batch, which is what `copy` takes.
pub fn format_questions_text(batch: &QuestionBatch, color: bool) -> String {
    if batch.is_empty() {
        return "No questions yet.".to_string();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if !color {
        table.force_no_tty();
    }
    table.set_header(vec!["#", "Difficulty", "Question"]);

    for difficulty in Difficulty::ALL {
        for (index, question) in batch
            .questions()
            .iter()
            .enumerate()
            .filter(|(_, q)| q.difficulty == difficulty)
        {
            table.add_row(vec![
                Cell::new(index + 1),
                Cell::new(difficulty.label()).fg(difficulty_color(difficulty)),
                Cell::new(&question.text),
            ]);
        }
    }

    format!(
        "{}\n\n{}",
        format_section_heading(&format!("Questions ({})", batch.len()), color),
        table
    )
}

pub fn format_questions_json(batch: &QuestionBatch) -> Result<String, ApiError> {
    serde_json::to_string_pretty(batch)
        .map_err(|e| ApiError::InvalidInput(format!("Failed to serialize questions: {}", e)))
}

/// "Label: value" lines for the provided fields.
pub fn format_context_text(context: &SocialContext) -> String {
    let summary = context.summary();
    if summary.is_empty() {
        return "  (no context yet)".to_string();
    }
    summary
        .iter()
        .map(|(label, value)| format!("  {:<16} {}", format!("{}:", label), value))
        .collect::<Vec<_>>()
        .join("\n")
}

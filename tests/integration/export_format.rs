//! Export block layout.

use sparks::export::{format_export, group_heading, EXPORT_ATTRIBUTION, EXPORT_TITLE};
use sparks::{ContextField, Difficulty, Question, QuestionBatch, SocialContext};

#[test]
fn test_two_groups_two_headings() {
    let batch = QuestionBatch::new(vec![
        Question::new("A", Difficulty::Icebreaker),
        Question::new("B", Difficulty::Connection),
    ]);
    let text = format_export(&batch, &SocialContext::new());
    let headings = Difficulty::ALL
        .iter()
        .filter(|d| text.contains(group_heading(**d)))
        .count();
    assert_eq!(headings, 2);
}

#[test]
fn test_full_layout() {
    let batch = QuestionBatch::new(vec![
        Question::new("Deep one?", Difficulty::Deep),
        Question::new("Ice one?", Difficulty::Icebreaker),
        Question::new("Ice two?", Difficulty::Icebreaker),
    ]);
    let context = SocialContext::new()
        .with(ContextField::GroupSize, "2-3")
        .with(ContextField::Closeness, "close-friends");

    let expected = format!(
        "{}\n\nGroup Size: 2-3 people · Closeness Level: Close Friends\n\n🧊 Icebreakers\n1. Ice one?\n2. Ice two?\n\n🌊 Deep\nDeep one?\n\n{}",
        EXPORT_TITLE, EXPORT_ATTRIBUTION
    );
    assert_eq!(format_export(&batch, &context), expected);
}

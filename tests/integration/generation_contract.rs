//! End-to-end generation contract through a session with a scripted backend.

use super::support::{standard_batch_json, MemoryClipboard, ScriptedBackend};
use sparks::notice::NoticeLevel;
use sparks::prompt::{FALLBACK_AGE_RANGE, FALLBACK_CLOSENESS, FALLBACK_INTERESTS};
use sparks::{
    ApiError, ContextField, Difficulty, GenerationKind, GenerationOutcome, Question,
    Session, SocialContext,
};

fn party_context() -> SocialContext {
    SocialContext::new()
        .with(ContextField::GroupSize, "4-6")
        .with(ContextField::Vibe, "board game night")
}

#[tokio::test]
async fn test_one_backend_call_with_values_and_fallbacks() {
    let backend = ScriptedBackend::replying(&[&standard_batch_json()]);
    let session = Session::with_context(backend.clone(), party_context());

    let notice = session.trigger(GenerationKind::Fresh).await;
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(backend.call_count(), 1);

    let prompt = &backend.prompts()[0];
    assert!(prompt.contains("4-6"));
    assert!(prompt.contains("board game night"));
    assert!(prompt.contains(&format!("Age Range: {}", FALLBACK_AGE_RANGE)));
    assert!(prompt.contains(&format!("Interests: {}", FALLBACK_INTERESTS)));
    assert!(prompt.contains(&format!("Closeness Level: {}", FALLBACK_CLOSENESS)));
    assert_eq!(session.batch().len(), 8);
}

#[tokio::test]
async fn test_empty_context_never_reaches_backend() {
    let backend = ScriptedBackend::replying(&[&standard_batch_json()]);
    let session = Session::new(backend.clone());

    let notice = session.trigger(GenerationKind::Fresh).await;
    assert!(notice.is_error());
    assert_eq!(
        notice.message,
        "Please provide at least some context about your group"
    );
    assert_eq!(backend.call_count(), 0);
    assert!(session.batch().is_empty());
}

#[tokio::test]
async fn test_whitespace_only_field_counts_as_provided() {
    let backend = ScriptedBackend::replying(&[&standard_batch_json()]);
    let session = Session::with_context(
        backend.clone(),
        SocialContext::new().with(ContextField::Interests, " "),
    );
    assert!(session.generate(GenerationKind::Fresh).await.is_ok());
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn test_two_question_response_is_held_exactly() {
    let backend = ScriptedBackend::replying(&[
        r#"{"questions":[{"text":"A","difficulty":"icebreaker"},{"text":"B","difficulty":"connection"}]}"#,
    ]);
    let session = Session::with_context(backend, party_context());

    let outcome = session.generate(GenerationKind::Fresh).await.unwrap();
    assert_eq!(outcome, GenerationOutcome::Applied { count: 2 });
    assert_eq!(
        session.batch().questions(),
        &[
            Question::new("A", Difficulty::Icebreaker),
            Question::new("B", Difficulty::Connection),
        ]
    );
}

#[tokio::test]
async fn test_malformed_response_keeps_previous_batch() {
    let backend = ScriptedBackend::replying(&[&standard_batch_json(), "not json"]);
    let session = Session::with_context(backend, party_context());
    session.generate(GenerationKind::Fresh).await.unwrap();
    let before = session.batch();

    let notice = session.trigger(GenerationKind::Fresh).await;
    assert!(notice.is_error());
    assert_eq!(notice.message, "Failed to generate questions. Please try again.");
    assert_eq!(session.batch(), before);
}

#[tokio::test]
async fn test_unknown_difficulty_rejects_whole_batch() {
    let backend = ScriptedBackend::replying(&[
        r#"{"questions":[{"text":"Fine","difficulty":"deep"},{"text":"Odd","difficulty":"spicy"}]}"#,
    ]);
    let session = Session::with_context(backend, party_context());
    let err = session.generate(GenerationKind::Fresh).await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse(_)));
    assert!(session.batch().is_empty());
}

#[tokio::test]
async fn test_backend_failure_keeps_batch_and_shares_message() {
    let backend = ScriptedBackend::replying(&[&standard_batch_json()]);
    backend.push_failure(ApiError::ProviderRateLimit("slow down".to_string()));
    let session = Session::with_context(backend, party_context());
    session.generate(GenerationKind::Fresh).await.unwrap();
    let before = session.batch();

    let notice = session.trigger(GenerationKind::More).await;
    assert_eq!(notice.message, "Failed to generate questions. Please try again.");
    assert_eq!(session.batch(), before);
}

#[tokio::test]
async fn test_generate_more_lists_every_prior_question() {
    let backend = ScriptedBackend::replying(&[
        &standard_batch_json(),
        r#"{"questions":[{"text":"Something new?","difficulty":"deep"}]}"#,
    ]);
    let session = Session::with_context(backend.clone(), party_context());
    session.generate(GenerationKind::Fresh).await.unwrap();
    let prior = session.batch().texts();
    assert_eq!(prior.len(), 8);

    session.generate(GenerationKind::More).await.unwrap();
    let follow_up = &backend.prompts()[1];
    assert!(follow_up.contains("The group has already been asked these questions:"));
    for text in &prior {
        assert!(follow_up.contains(&format!("- {}", text)), "missing {:?}", text);
    }
    assert_eq!(session.batch().texts(), vec!["Something new?"]);
}

#[tokio::test]
async fn test_fresh_generation_has_no_exclusions() {
    let backend = ScriptedBackend::replying(&[&standard_batch_json(), &standard_batch_json()]);
    let session = Session::with_context(backend.clone(), party_context());
    session.generate(GenerationKind::Fresh).await.unwrap();
    session.generate(GenerationKind::Fresh).await.unwrap();
    assert!(!backend.prompts()[1].contains("already been asked"));
}

#[tokio::test]
async fn test_copy_notices() {
    let backend = ScriptedBackend::replying(&[&standard_batch_json()]);
    let session = Session::with_context(backend, party_context());
    session.generate(GenerationKind::Fresh).await.unwrap();

    let clipboard = MemoryClipboard::new();
    let notice = session.copy_question(0, clipboard.as_ref());
    assert_eq!(notice.message, "Copied to clipboard!");
    assert_eq!(
        clipboard.last().as_deref(),
        Some("What's the best thing you ate this week?")
    );

    let notice = session.copy_export(clipboard.as_ref());
    assert_eq!(notice.level, NoticeLevel::Success);
    assert!(clipboard.last().unwrap().starts_with("💬 Conversation Sparks"));

    let before = session.batch();
    let notice = session.copy_export(MemoryClipboard::failing().as_ref());
    assert_eq!(notice.message, "Failed to copy");
    assert_eq!(session.batch(), before);
}

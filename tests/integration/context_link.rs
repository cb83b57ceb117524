//! Share link round trips and parsing of incoming links.

use sparks::{ContextField, SocialContext};

#[test]
fn test_full_context_round_trips_through_link() {
    let context = SocialContext::new()
        .with(ContextField::GroupSize, "10+")
        .with(ContextField::AgeRange, "mixed")
        .with(ContextField::Vibe, "rooftop & sunset, 100% chill")
        .with(ContextField::Interests, "jazz, café culture, 日本")
        .with(ContextField::Closeness, "officemates");

    let link = context.to_link("https://sparks.example/app").unwrap();
    assert!(link.starts_with("https://sparks.example/app?"));
    assert_eq!(SocialContext::from_link(&link).unwrap(), context);
}

#[test]
fn test_empty_fields_are_omitted_from_link() {
    let context = SocialContext::new().with(ContextField::Vibe, "cozy");
    assert_eq!(context.to_query_string(), "vibe=cozy");
    assert_eq!(
        context.to_link("https://sparks.example/").unwrap(),
        "https://sparks.example/?vibe=cozy"
    );
    assert_eq!(
        SocialContext::new().to_link("https://sparks.example/").unwrap(),
        "https://sparks.example/"
    );
}

#[test]
fn test_unknown_parameters_are_ignored() {
    let context =
        SocialContext::from_query_string("?utm_source=chat&closeness=family&groupSize=2-3");
    assert_eq!(context.get(ContextField::Closeness), "family");
    assert_eq!(context.get(ContextField::GroupSize), "2-3");
    assert_eq!(context.get(ContextField::Vibe), "");
}

#[test]
fn test_invalid_full_link_is_an_error() {
    assert!(SocialContext::from_link("https://exa mple.com/?vibe=x").is_err());
}

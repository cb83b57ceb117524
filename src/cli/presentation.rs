//! CLI presentation: text and json formatters per command family.

mod notice;
mod questions;
mod settings;

pub use notice::format_notice;
pub use questions::{
    format_context_text, format_questions_json, format_questions_text,
    format_section_heading,
};
pub use settings::{format_config_json, format_config_text, format_validation_text};

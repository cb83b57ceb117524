//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod help;
mod interactive;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands, ConfigCommands, ConfigFormat, ContextArgs, QuestionFormat};
pub use presentation::{format_notice, format_questions_json, format_questions_text};
pub use route::{load_batch, load_exclusions, resolve_context, RunContext};

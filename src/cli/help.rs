//! Command-name contract for log events.

use crate::cli::parse::{Commands, ConfigCommands};

/// Dotted command name, e.g. "generate" or "config.show".
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Generate { .. } => "generate",
        Commands::Session { .. } => "session",
        Commands::Export { .. } => "export",
        Commands::Link { .. } => "link",
        Commands::Config { command } => match command {
            ConfigCommands::Show { .. } => "config.show",
            ConfigCommands::Validate => "config.validate",
        },
    }
}

//! CLI parse: clap types for Sparks. No behavior; definitions only.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Sparks CLI - conversation starters for the group you're with
#[derive(Parser, Debug)]
#[command(name = "sparks")]
#[command(version)]
#[command(about = "Generate conversation starter questions tailored to a social setting")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace directory searched for sparks.toml
    #[arg(long, global = true, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (replaces global and workspace config files)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug-level logging
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (when output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// The five context fields, plus an optional share link to start from.
#[derive(Args, Debug, Clone, Default)]
pub struct ContextArgs {
    /// Group size, e.g. 2-3, 4-6, 7-10, 10+
    #[arg(long)]
    pub group_size: Option<String>,

    /// Age range, e.g. teens, young-adults, adults, mature, mixed
    #[arg(long)]
    pub age_range: Option<String>,

    /// Vibe of the gathering, free text
    #[arg(long)]
    pub vibe: Option<String>,

    /// Shared interests, free text
    #[arg(long)]
    pub interests: Option<String>,

    /// How well the group knows each other, e.g. strangers, friends, family
    #[arg(long)]
    pub closeness: Option<String>,

    /// Share link or query string to pre-populate from; explicit flags win
    #[arg(long)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QuestionFormat {
    /// Table grouped by difficulty
    Text,
    /// {"questions": [...]}
    Json,
    /// Plain-text block for chat apps
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one batch of questions
    Generate {
        #[command(flatten)]
        context: ContextArgs,

        /// Questions to avoid: a saved JSON batch or one question per line
        #[arg(long)]
        avoid: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: QuestionFormat,

        /// Also copy the export block to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Interactive session: edit the context, generate, copy, share
    Session {
        #[command(flatten)]
        context: ContextArgs,
    },
    /// Render the export block for a saved batch
    Export {
        /// Saved batch in {"questions": [...]} form
        #[arg(long)]
        questions: PathBuf,

        #[command(flatten)]
        context: ContextArgs,

        /// Copy the block to the clipboard as well
        #[arg(long)]
        copy: bool,
    },
    /// Print the shareable link for a context
    Link {
        #[command(flatten)]
        context: ContextArgs,

        /// Base URL to attach the query to; prints the bare query otherwise
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration (API key redacted)
    Show {
        #[arg(long, value_enum, default_value = "text")]
        format: ConfigFormat,
    },
    /// Validate the effective configuration
    Validate,
}

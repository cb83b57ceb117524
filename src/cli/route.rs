//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::help::command_name;
use crate::cli::interactive::InteractiveSession;
use crate::cli::parse::{Commands, ConfigCommands, ConfigFormat, ContextArgs, QuestionFormat};
use crate::cli::presentation::{
    format_config_json, format_config_text, format_notice, format_questions_json,
    format_questions_text, format_validation_text,
};
use crate::clipboard::{Clipboard, SystemClipboard};
use crate::config::{ConfigLoader, SparksConfig};
use crate::context::{ContextField, SocialContext};
use crate::error::ApiError;
use crate::export::format_export;
use crate::generation::{parse_response, QuestionGenerator};
use crate::notice::Notice;
use crate::prompt::GenerationRequest;
use crate::provider::{GenerationBackend, ProviderBackend};
use crate::question::QuestionBatch;
use crate::session::Session;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

/// Runtime context for CLI execution: effective configuration, the async
/// runtime, and the injected backend and clipboard.
pub struct RunContext {
    config: SparksConfig,
    config_source: String,
    runtime: Runtime,
    backend: Option<Arc<dyn GenerationBackend>>,
    clipboard: Arc<dyn Clipboard>,
    color: bool,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let (config, config_source) = match config_path {
            Some(ref path) => (
                ConfigLoader::load_from_file(path)?,
                path.display().to_string(),
            ),
            None => (
                ConfigLoader::load(&workspace_root)?,
                format!("layered (workspace {})", workspace_root.display()),
            ),
        };
        let mut context = Self::with_parts(config, None, Arc::new(SystemClipboard::new()))?;
        context.config_source = config_source;
        Ok(context)
    }

    /// Build from explicit parts. A `None` backend is created from the
    /// provider configuration on first use.
    pub fn with_parts(
        config: SparksConfig,
        backend: Option<Arc<dyn GenerationBackend>>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Result<Self, ApiError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            config,
            config_source: "explicit".to_string(),
            runtime,
            backend,
            clipboard,
            color: false,
        })
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn config(&self) -> &SparksConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let name = command_name(command);
        let result = self.execute_inner(command);
        info!(
            command = name,
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Generate {
                context,
                avoid,
                format,
                copy,
            } => self.handle_generate(context, avoid.as_deref(), *format, *copy),
            Commands::Session { context } => self.handle_session(context),
            Commands::Export {
                questions,
                context,
                copy,
            } => self.handle_export(questions, context, *copy),
            Commands::Link { context, base_url } => {
                self.handle_link(context, base_url.as_deref())
            }
            Commands::Config { command } => match command {
                ConfigCommands::Show { format } => self.handle_config_show(*format),
                ConfigCommands::Validate => self.handle_config_validate(),
            },
        }
    }

    fn backend(&self) -> Result<Arc<dyn GenerationBackend>, ApiError> {
        if let Some(backend) = &self.backend {
            return Ok(Arc::clone(backend));
        }
        let backend = ProviderBackend::from_config(
            &self.config.provider,
            self.config.generation.completion_options(),
        )?;
        debug!(backend = %backend.describe(), "Created generation backend");
        Ok(Arc::new(backend))
    }

    fn handle_generate(
        &self,
        args: &ContextArgs,
        avoid: Option<&Path>,
        format: QuestionFormat,
        copy: bool,
    ) -> Result<String, ApiError> {
        let context = resolve_context(args)?;
        if context.is_empty() {
            return Err(ApiError::EmptyContext);
        }
        let exclusions = match avoid {
            Some(path) => load_exclusions(path)?,
            None => Vec::new(),
        };
        let request = GenerationRequest::new(&context).with_exclusions(exclusions);

        let generator = QuestionGenerator::new(self.backend()?);
        let batch = self.runtime.block_on(generator.generate(&request))?;

        let output = match format {
            QuestionFormat::Text => format_questions_text(&batch, self.color),
            QuestionFormat::Json => format_questions_json(&batch)?,
            QuestionFormat::Export => format_export(&batch, &context),
        };
        if copy {
            self.copy_with_notice(&format_export(&batch, &context));
        }
        Ok(output)
    }

    /// Copy failures never fail the command; they end in a notice on stderr.
    fn copy_with_notice(&self, text: &str) {
        let notice = match self.clipboard.copy(text) {
            Ok(()) => Notice::success("Copied to clipboard!"),
            Err(e) => {
                warn!(error = %e, "Clipboard copy failed");
                Notice::from_error(&e)
            }
        };
        eprintln!("{}", format_notice(&notice, self.color));
    }

    fn handle_session(&self, args: &ContextArgs) -> Result<String, ApiError> {
        let context = resolve_context(args)?;
        let session = Session::with_context(self.backend()?, context);
        InteractiveSession::new(&session, &self.runtime, self.clipboard.as_ref(), self.color)
            .run()?;
        Ok(String::new())
    }

    fn handle_export(
        &self,
        questions: &Path,
        args: &ContextArgs,
        copy: bool,
    ) -> Result<String, ApiError> {
        let batch = load_batch(questions)?;
        let context = resolve_context(args)?;
        let text = format_export(&batch, &context);
        if copy {
            self.copy_with_notice(&text);
        }
        Ok(text)
    }

    fn handle_link(&self, args: &ContextArgs, base_url: Option<&str>) -> Result<String, ApiError> {
        let context = resolve_context(args)?;
        match base_url {
            Some(base) => context.to_link(base),
            None => Ok(context.to_query_string()),
        }
    }

    fn handle_config_show(&self, format: ConfigFormat) -> Result<String, ApiError> {
        match format {
            ConfigFormat::Text => format_config_text(&self.config, &self.config_source),
            ConfigFormat::Json => format_config_json(&self.config),
        }
    }

    fn handle_config_validate(&self) -> Result<String, ApiError> {
        match self.config.validate() {
            Ok(()) => Ok(format_validation_text(&[])),
            Err(errors) => Err(ApiError::ConfigError(format_validation_text(&errors))),
        }
    }
}

/// Context from `--link` (if any) with explicit field flags layered on top.
pub fn resolve_context(args: &ContextArgs) -> Result<SocialContext, ApiError> {
    let mut context = match &args.link {
        Some(link) => SocialContext::from_link(link)?,
        None => SocialContext::new(),
    };
    let flags = [
        (ContextField::GroupSize, &args.group_size),
        (ContextField::AgeRange, &args.age_range),
        (ContextField::Vibe, &args.vibe),
        (ContextField::Interests, &args.interests),
        (ContextField::Closeness, &args.closeness),
    ];
    for (field, value) in flags {
        if let Some(value) = value {
            context.update(field, value.clone());
        }
    }
    Ok(context)
}

fn read_input_file(path: &Path) -> Result<String, ApiError> {
    std::fs::read_to_string(path).map_err(|e| {
        ApiError::InvalidInput(format!("Failed to read {}: {}", path.display(), e))
    })
}

/// Saved batch in `{"questions": [...]}` form, held to the same rules as a
/// backend response.
pub fn load_batch(path: &Path) -> Result<QuestionBatch, ApiError> {
    let raw = read_input_file(path)?;
    parse_response(&raw).map_err(|e| match e {
        ApiError::MalformedResponse(detail) => ApiError::InvalidInput(format!(
            "{} is not a saved question batch: {}",
            path.display(),
            detail
        )),
        other => other,
    })
}

/// Prior question texts from a saved batch, or one per non-blank line.
pub fn load_exclusions(path: &Path) -> Result<Vec<String>, ApiError> {
    let raw = read_input_file(path)?;
    if let Ok(batch) = parse_response(&raw) {
        return Ok(batch.texts());
    }
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

use super::merge::builder_with_defaults;
use super::sources::{environment, global_file, workspace_file};
use super::SparksConfig;
use config::{Config, ConfigError, File};
use std::path::{Path, PathBuf};

/// Loads [`SparksConfig`] from the layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace directory.
    ///
    /// Precedence, lowest first: defaults, global file, `sparks.toml`,
    /// `sparks.{SPARKS_ENV}.toml`, `SPARKS__*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<SparksConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }

    /// Load from an explicit file. Environment overrides still apply; the
    /// global and workspace files are skipped.
    pub fn load_from_file(path: &Path) -> Result<SparksConfig, ConfigError> {
        let builder = builder_with_defaults()?.add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }

    /// Built-in defaults only.
    pub fn defaults() -> Result<SparksConfig, ConfigError> {
        builder_with_defaults()?.build()?.try_deserialize()
    }

    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    /// Parse a TOML string layered over defaults. No files or environment.
    pub fn from_toml_str(contents: &str) -> Result<SparksConfig, ConfigError> {
        builder_with_defaults()?
            .add_source(File::from_str(contents, config::FileFormat::Toml))
            .build()
            .and_then(Config::try_deserialize)
    }
}

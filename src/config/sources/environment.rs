//! Environment source: SPARKS__SECTION__KEY variables.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "SPARKS";
pub const ENV_SEPARATOR: &str = "__";

/// `SPARKS__PROVIDER__MODEL=llama3` sets `provider.model`. Single-underscore
/// variables such as `SPARKS_LOG` are left to the logging layer.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    )
}

//! Environment variable source: BENCHREG_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `BENCHREG__AGGREGATE__ERROR_THRESHOLD=3` sets `aggregate.error_threshold`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix("BENCHREG")
            .separator("__")
            .try_parsing(true),
    ))
}

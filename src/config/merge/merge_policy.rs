//! Built-in defaults seeded into every builder before any file or env source.

use crate::aggregate::DEFAULT_ERROR_THRESHOLD;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder preloaded with the lowest-precedence defaults.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("aggregate.input_dir", "_results")?
        .set_default("aggregate.output_path", "_all_results.json")?
        .set_default("aggregate.error_threshold", DEFAULT_ERROR_THRESHOLD as i64)?
        .set_default("collate.registry_root", ".")
}

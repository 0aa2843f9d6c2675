//! User-wide config file: `$XDG_CONFIG_HOME/benchreg/config.toml` (optional).

use crate::config::paths;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match paths::global_config_path() {
        Some(path) => Ok(builder.add_source(File::from(path).required(false))),
        None => Ok(builder),
    }
}

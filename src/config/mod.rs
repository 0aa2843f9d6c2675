//! Configuration
//!
//! Layered configuration built with the `config` crate. Precedence, lowest to
//! highest: built-in defaults, `$XDG_CONFIG_HOME/benchreg/config.toml`,
//! `<workspace>/benchreg.toml`, `BENCHREG__*` environment variables.

mod facade;
mod merge;
pub mod paths;
mod sources;

pub use facade::ConfigLoader;

use crate::aggregate::DEFAULT_ERROR_THRESHOLD;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Workspace-level config file name.
pub const WORKSPACE_CONFIG_FILE: &str = "benchreg.toml";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchConfig {
    #[serde(default)]
    pub aggregate: AggregateConfig,

    #[serde(default)]
    pub collate: CollateConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("_results")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("_all_results.json")
}

fn default_error_threshold() -> usize {
    DEFAULT_ERROR_THRESHOLD
}

/// Result aggregation defaults (relative paths resolve against the workspace).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateConfig {
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Unreadable blurbs tolerated before the run fails
    #[serde(default = "default_error_threshold")]
    pub error_threshold: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_path: default_output_path(),
            error_threshold: default_error_threshold(),
        }
    }
}

fn default_registry_root() -> PathBuf {
    PathBuf::from(".")
}

/// Tree collation defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollateConfig {
    /// Registry root holding `datasets/`, `tasks/` and `models/`
    #[serde(default = "default_registry_root")]
    pub registry_root: PathBuf,
}

impl Default for CollateConfig {
    fn default() -> Self {
        Self {
            registry_root: default_registry_root(),
        }
    }
}

//! Error types
//!
//! One error enum per concern. `ApiError` is what the CLI layer sees.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a registry tree.
#[derive(Debug, Error)]
pub enum CollateError {
    #[error("Directory {} does not exist.", .0.display())]
    NotFound(PathBuf),

    #[error("Path {} is not a directory.", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML in {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid indicator pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Errors raised while merging result blurbs.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("{message}")]
    InputMissing { message: String },

    #[error("Input directory '{}' is not a directory.", .0.display())]
    NotADirectory(PathBuf),

    #[error("{message}")]
    NoResultFiles { message: String },

    #[error("Too many errors ({count}) while reading results. Please check the logs for more details.")]
    TooManyErrors { count: usize },

    #[error("{message}")]
    NoNewResults { message: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while packaging a single evaluation result.
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("File not found: {}", .0.display())]
    EvaluationNotFound(PathBuf),

    #[error("Output file {} already exists and overwriting was not requested", .0.display())]
    OutputExists(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level error surfaced by the CLI.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Collate(#[from] CollateError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error(transparent)]
    Package(#[from] PackageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

//! Result Packaging
//!
//! Wraps one evaluation JSON blob with the dataset, task and model it was
//! produced for, the library version, and a creation timestamp.

use crate::error::PackageError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Library version recorded in every packaged result.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A packaged evaluation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPackage {
    pub dataset: String,
    pub task: String,
    pub model: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub result: serde_json::Value,
}

impl ResultPackage {
    /// Package `result` with the current library version.
    pub fn new(
        dataset: impl Into<String>,
        task: impl Into<String>,
        model: impl Into<String>,
        result: serde_json::Value,
        timestamp: DateTime<Utc>,
    ) -> Self {
        ResultPackage {
            dataset: dataset.into(),
            task: task.into(),
            model: model.into(),
            version: VERSION.to_string(),
            timestamp,
            result,
        }
    }

    /// Write the package as JSON. Refuses to replace an existing file unless
    /// `do_overwrite` is set.
    pub fn to_json(&self, path: &Path, do_overwrite: bool) -> Result<(), PackageError> {
        if path.exists() && !do_overwrite {
            return Err(PackageError::OutputExists(path.to_path_buf()));
        }
        let io_err = |source| PackageError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let text = serde_json::to_string_pretty(self).map_err(|source| PackageError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, text).map_err(io_err)
    }

    /// Read a package previously written by [`ResultPackage::to_json`].
    pub fn from_json(path: &Path) -> Result<Self, PackageError> {
        let text = std::fs::read_to_string(path).map_err(|source| PackageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| PackageError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Inputs for [`package_result`].
#[derive(Debug, Clone)]
pub struct PackageRequest {
    pub evaluation_fp: PathBuf,
    pub dataset: String,
    pub task: String,
    pub model: String,
    pub result_fp: PathBuf,
    pub do_overwrite: bool,
}

/// Package the evaluation file named by `request` and write it to `result_fp`.
///
/// The timestamp is the evaluation file's modification time.
pub fn package_result(request: &PackageRequest) -> Result<ResultPackage, PackageError> {
    let eval_fp = &request.evaluation_fp;
    if !eval_fp.is_file() {
        return Err(PackageError::EvaluationNotFound(eval_fp.clone()));
    }

    let io_err = |source| PackageError::Io {
        path: eval_fp.clone(),
        source,
    };
    let text = std::fs::read_to_string(eval_fp).map_err(io_err)?;
    let result: serde_json::Value =
        serde_json::from_str(&text).map_err(|source| PackageError::Json {
            path: eval_fp.clone(),
            source,
        })?;
    let modified = std::fs::metadata(eval_fp)
        .and_then(|meta| meta.modified())
        .map_err(io_err)?;

    let package = ResultPackage::new(
        request.dataset.clone(),
        request.task.clone(),
        request.model.clone(),
        result,
        DateTime::<Utc>::from(modified),
    );
    package.to_json(&request.result_fp, request.do_overwrite)?;

    info!(
        dataset = %package.dataset,
        task = %package.task,
        model = %package.model,
        output = %request.result_fp.display(),
        "Packaged result"
    );
    Ok(package)
}

//! Result Aggregation
//!
//! Merges per-submission `result.json` blurbs into one JSON object keyed by the
//! name of the directory holding each blurb. Ids already present in the output
//! file are kept as-is; unreadable blurbs are tolerated up to a threshold.

use crate::error::AggregateError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

pub const RESULT_FILE_NAME: &str = "result.json";
pub const DEFAULT_ERROR_THRESHOLD: usize = 10;

/// Outcome of one aggregation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateSummary {
    pub output_path: PathBuf,
    /// Results in the output file after the run
    pub total: usize,
    /// Results added by this run
    pub added: usize,
    /// Blurbs skipped because their id was already present
    pub skipped: usize,
    /// Blurbs that could not be read or parsed
    pub errors: usize,
}

/// Aggregate every `result.json` under `input_dir` into `output_path`.
pub fn aggregate_results(
    input_dir: &Path,
    output_path: &Path,
    error_threshold: usize,
) -> Result<AggregateSummary, AggregateError> {
    if !input_dir.exists() {
        return Err(AggregateError::InputMissing {
            message: describe_missing_input(input_dir),
        });
    }
    if !input_dir.is_dir() {
        return Err(AggregateError::NotADirectory(display_path(input_dir)));
    }

    let mut results = load_existing(output_path)?;

    let result_fps = find_json_files(input_dir, |name| name == RESULT_FILE_NAME);
    let found_line = format!(
        "Found no new results to add! Files present: {}.",
        join_paths(&result_fps)
    );

    if result_fps.is_empty() {
        let all_jsons = find_json_files(input_dir, |_| true);
        return Err(AggregateError::NoResultFiles {
            message: format!(
                "{}\nAll JSON files in input dir '{}':{}.",
                found_line,
                display_path(input_dir).display(),
                join_paths(&all_jsons)
            ),
        });
    }

    let mut parse_errors: Vec<String> = Vec::new();
    let mut added = 0;
    let mut skipped = 0;
    for result_fp in &result_fps {
        let Some(id) = result_id(result_fp) else {
            warn!(file = %result_fp.display(), "Result has no directory name to key it by");
            parse_errors.push(format!(
                "{}: containing directory has no name to use as the result id",
                result_fp.display()
            ));
            if parse_errors.len() > error_threshold {
                return Err(AggregateError::TooManyErrors {
                    count: parse_errors.len(),
                });
            }
            continue;
        };

        if results.contains_key(&id) {
            info!(id = %id, "Skipping result already in the aggregated results");
            skipped += 1;
            continue;
        }

        match read_json(result_fp) {
            Ok(value) => {
                results.insert(id, value);
                added += 1;
            }
            Err(err) => {
                warn!(file = %result_fp.display(), error = %err, "Failed to read result");
                parse_errors.push(err.to_string());
                if parse_errors.len() > error_threshold {
                    return Err(AggregateError::TooManyErrors {
                        count: parse_errors.len(),
                    });
                }
            }
        }
    }

    if added == 0 {
        let mut lines = vec![
            found_line,
            format!("Obtained {} errors: ", parse_errors.len()),
        ];
        lines.extend(parse_errors);
        return Err(AggregateError::NoNewResults {
            message: lines.join("\n"),
        });
    }

    write_results(output_path, &results)?;

    info!(
        output = %output_path.display(),
        total = results.len(),
        added,
        "Wrote aggregated results"
    );

    Ok(AggregateSummary {
        output_path: output_path.to_path_buf(),
        total: results.len(),
        added,
        skipped,
        errors: parse_errors.len(),
    })
}

fn result_id(result_fp: &Path) -> Option<String> {
    result_fp
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
}

fn load_existing(output_path: &Path) -> Result<Map<String, Value>, AggregateError> {
    if !output_path.exists() {
        return Ok(Map::new());
    }
    let text = std::fs::read_to_string(output_path).map_err(|source| AggregateError::Io {
        path: output_path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| AggregateError::Json {
        path: output_path.to_path_buf(),
        source,
    })
}

fn read_json(path: &Path) -> Result<Value, AggregateError> {
    let text = std::fs::read_to_string(path).map_err(|source| AggregateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| AggregateError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_results(output_path: &Path, results: &Map<String, Value>) -> Result<(), AggregateError> {
    let io_err = |source| AggregateError::Io {
        path: output_path.to_path_buf(),
        source,
    };
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let text = serde_json::to_string(results).map_err(|source| AggregateError::Json {
        path: output_path.to_path_buf(),
        source,
    })?;
    std::fs::write(output_path, text).map_err(io_err)
}

/// Recursively list `*.json` files under `dir` whose name passes `keep`, sorted.
fn find_json_files(dir: &Path, keep: impl Fn(&str) -> bool) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| name.ends_with(".json") && keep(name))
                .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect()
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Explain a missing input directory by walking up to the nearest existing parent.
fn describe_missing_input(input_dir: &Path) -> String {
    let mut lines = vec![format!(
        "Input directory '{}' does not exist.",
        display_path(input_dir).display()
    )];

    let mut current = display_path(input_dir);
    for _ in 0..2 {
        let Some(parent) = current.parent().map(Path::to_path_buf) else {
            break;
        };
        if !parent.exists() {
            lines.push(format!(
                "Parent directory '{}' does not exist.",
                parent.display()
            ));
            current = parent;
            continue;
        }

        lines.push(format!("Parent directory '{}' exists.", parent.display()));
        if let Ok(entries) = std::fs::read_dir(&parent) {
            let mut names: Vec<String> = entries
                .filter_map(Result::ok)
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect();
            names.sort();
            for name in names {
                lines.push(format!("  contains '{}'", name));
            }
        }
        break;
    }

    lines.join("\n")
}

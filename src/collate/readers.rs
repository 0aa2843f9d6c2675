//! Recognized metadata files and their parsers.
//!
//! A file is recognized only when both its full suffix chain and its exact
//! name appear in [`FILE_READERS`]. Everything else in a directory is ignored.

use crate::error::CollateError;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Parsed content of one recognized file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FileContent {
    /// Structured value decoded from YAML
    Yaml(serde_yaml::Value),
    /// Raw file text
    Text(String),
    /// Stripped, non-empty lines
    Lines(Vec<String>),
}

/// How a recognized file is turned into [`FileContent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderKind {
    Yaml,
    Text,
    Requirements,
}

/// One row of the reader table.
#[derive(Debug, Clone, Copy)]
pub struct FileReader {
    pub suffix: &'static str,
    pub names: &'static [&'static str],
    pub kind: ReaderKind,
}

pub const FILE_READERS: &[FileReader] = &[
    FileReader {
        suffix: ".yaml",
        names: &["dataset.yaml", "model.yaml", "task.yaml", "predicates.yaml"],
        kind: ReaderKind::Yaml,
    },
    FileReader {
        suffix: ".md",
        names: &["README.md"],
        kind: ReaderKind::Text,
    },
    FileReader {
        suffix: ".bib",
        names: &["refs.bib"],
        kind: ReaderKind::Text,
    },
    FileReader {
        suffix: ".txt",
        names: &["requirements.txt"],
        kind: ReaderKind::Requirements,
    },
];

/// Full suffix chain of a file name: `refs.bib` -> `.bib`, `a.tar.gz` -> `.tar.gz`.
///
/// Leading dots belong to the stem, so `.hidden` has no suffix.
pub fn full_suffix(file_name: &str) -> Option<&str> {
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();
    let rest = &file_name[stem_start..];
    let dot = rest.find('.')?;
    let suffix = &rest[dot..];
    if suffix.ends_with('.') {
        return None;
    }
    Some(suffix)
}

/// Look up the reader for a file name, if the name is recognized.
pub fn reader_for(file_name: &str) -> Option<ReaderKind> {
    let suffix = full_suffix(file_name)?;
    FILE_READERS
        .iter()
        .find(|reader| reader.suffix == suffix)
        .filter(|reader| reader.names.contains(&file_name))
        .map(|reader| reader.kind)
}

/// Split requirements text into stripped, non-empty lines.
pub fn parse_requirements(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read and parse a recognized file.
pub fn read_file(path: &Path, kind: ReaderKind) -> Result<FileContent, CollateError> {
    let text = std::fs::read_to_string(path).map_err(|source| CollateError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match kind {
        ReaderKind::Yaml => serde_yaml::from_str(&text)
            .map(|value| FileContent::Yaml(string_keys(value)))
            .map_err(|source| CollateError::Yaml {
                path: path.to_path_buf(),
                source,
            }),
        ReaderKind::Text => Ok(FileContent::Text(text)),
        ReaderKind::Requirements => Ok(FileContent::Lines(parse_requirements(&text))),
    }
}

/// Rewrite mapping keys as strings so every decoded document serializes to JSON.
///
/// Scalars keep their YAML spelling (`~` becomes `"null"`, `1` becomes `"1"`);
/// sequence and mapping keys become their compact JSON text.
fn string_keys(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .into_iter()
                .map(|(key, value)| (Value::String(key_text(key)), string_keys(value)))
                .collect::<Mapping>(),
        ),
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(string_keys).collect()),
        Value::Tagged(mut tagged) => {
            tagged.value = string_keys(tagged.value);
            Value::Tagged(tagged)
        }
        scalar => scalar,
    }
}

fn key_text(key: Value) -> String {
    match key {
        Value::String(text) => text,
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Tagged(tagged) => key_text(tagged.value),
        complex => {
            let complex = string_keys(complex);
            serde_json::to_string(&complex).unwrap_or_else(|_| format!("{complex:?}"))
        }
    }
}

//! Collated node type and single-directory extraction.

use super::readers::{read_file, reader_for, FileContent};
use crate::error::CollateError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Recognized file name -> parsed content, ordered by file name.
pub type LeafData = BTreeMap<String, FileContent>;

/// One directory of the registry tree that carries recognized content.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Node {
    /// Path relative to the scan root, `/`-separated
    pub name: String,
    pub data: LeafData,
    /// Names of child nodes, in link order
    pub children: Vec<String>,
}

impl Node {
    pub fn new(name: impl Into<String>, data: LeafData) -> Self {
        Node {
            name: name.into(),
            data,
            children: Vec::new(),
        }
    }

    /// Link a child by name. Returns false if it was already linked.
    pub fn add_child(&mut self, child: &str) -> bool {
        if self.children.iter().any(|existing| existing == child) {
            return false;
        }
        self.children.push(child.to_string());
        true
    }

    /// Extract the recognized files directly inside `leaf`.
    ///
    /// Entries are visited in file-name order and only regular files (or
    /// symlinks to them) are considered. Subdirectories are never descended.
    pub fn data_from_leaf(leaf: &Path) -> Result<LeafData, CollateError> {
        if !leaf.exists() {
            return Err(CollateError::NotFound(leaf.to_path_buf()));
        }
        if !leaf.is_dir() {
            return Err(CollateError::NotADirectory(leaf.to_path_buf()));
        }

        let io_err = |source| CollateError::Io {
            path: leaf.to_path_buf(),
            source,
        };
        let mut entries = std::fs::read_dir(leaf)
            .map_err(io_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(io_err)?;
        entries.sort_by_key(|entry| entry.file_name());

        let mut data = LeafData::new();
        for entry in entries {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            let Some(kind) = reader_for(&file_name) else {
                continue;
            };
            tracing::trace!(file = %path.display(), "Reading recognized file");
            data.insert(file_name, read_file(&path, kind)?);
        }

        Ok(data)
    }
}

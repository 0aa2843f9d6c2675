//! Nested tree collation
//!
//! Finds every leaf directory (one directly holding a file that matches the
//! indicator pattern) beneath a root, then links each leaf to the nearest
//! ancestors that carry recognized files of their own. Ancestors without any
//! recognized file are gaps: they get no node, and the chain continues
//! through them to the next node-bearing ancestor.

use super::node::{LeafData, Node};
use crate::error::CollateError;
use glob::Pattern;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Relative node name -> node, ordered by name.
pub type NodeMap = BTreeMap<String, Node>;

/// Per-run memo of directory extractions, keyed by directory path.
#[derive(Debug, Default)]
struct LeafCache {
    entries: HashMap<PathBuf, LeafData>,
    reads: usize,
}

impl LeafCache {
    fn get_or_read(&mut self, dir: &Path) -> Result<&LeafData, CollateError> {
        if !self.entries.contains_key(dir) {
            let data = Node::data_from_leaf(dir)?;
            self.reads += 1;
            self.entries.insert(dir.to_path_buf(), data);
        }
        Ok(&self.entries[dir])
    }
}

/// Collates one registry root. Each call reads the filesystem afresh;
/// directory reads are shared only within a single call.
#[derive(Debug)]
pub struct Collator {
    root: PathBuf,
}

impl Collator {
    /// Create a collator for `root`, which must be an existing directory.
    pub fn new(root: &Path) -> Result<Self, CollateError> {
        if !root.exists() {
            return Err(CollateError::NotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(CollateError::NotADirectory(root.to_path_buf()));
        }
        let root = dunce::canonicalize(root).map_err(|source| CollateError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        Ok(Collator { root })
    }

    /// Build the node mapping for every leaf marked by `indicator`.
    pub fn collate(&self, indicator: &str) -> Result<NodeMap, CollateError> {
        self.collate_with(indicator, &mut LeafCache::default())
    }

    /// Build one node mapping per indicator, reading each directory at most once.
    pub fn collate_all(&self, indicators: &[&str]) -> Result<Vec<NodeMap>, CollateError> {
        let mut cache = LeafCache::default();
        indicators
            .iter()
            .map(|indicator| self.collate_with(indicator, &mut cache))
            .collect()
    }

    fn collate_with(&self, indicator: &str, cache: &mut LeafCache) -> Result<NodeMap, CollateError> {
        let pattern = Pattern::new(indicator).map_err(|source| CollateError::InvalidPattern {
            pattern: indicator.to_string(),
            source,
        })?;

        let leaves = self.find_leaves(&pattern)?;
        let mut nodes = NodeMap::new();
        for leaf in &leaves {
            self.link_leaf(leaf, cache, &mut nodes)?;
        }

        info!(
            root = %self.root.display(),
            indicator,
            leaves = leaves.len(),
            nodes = nodes.len(),
            "Collated registry tree"
        );
        Ok(nodes)
    }

    /// Directories directly holding a file named like `pattern`, in walk order.
    fn find_leaves(&self, pattern: &Pattern) -> Result<Vec<PathBuf>, CollateError> {
        let mut seen = HashSet::new();
        let mut leaves = Vec::new();

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry?;
            if entry.depth() == 0 || !entry.path().is_file() {
                continue;
            }
            let matches = entry
                .file_name()
                .to_str()
                .map(|name| pattern.matches(name))
                .unwrap_or(false);
            if !matches {
                continue;
            }
            if let Some(leaf) = entry.path().parent() {
                if seen.insert(leaf.to_path_buf()) {
                    leaves.push(leaf.to_path_buf());
                }
            }
        }

        Ok(leaves)
    }

    /// Insert the leaf node, then walk upward linking it into its ancestors.
    fn link_leaf(
        &self,
        leaf: &Path,
        cache: &mut LeafCache,
        nodes: &mut NodeMap,
    ) -> Result<(), CollateError> {
        let name = relative_name(&self.root, leaf);
        let data = cache.get_or_read(leaf)?;
        // A nested leaf may already have created this node as its ancestor.
        nodes
            .entry(name.clone())
            .or_insert_with(|| Node::new(name.clone(), data.clone()));
        debug!(leaf = %name, "Found leaf");

        let mut child_name = name;
        let mut current = leaf.parent();
        while let Some(dir) = current {
            if dir == self.root || !dir.starts_with(&self.root) {
                break;
            }
            current = dir.parent();

            let data = cache.get_or_read(dir)?;
            if data.is_empty() {
                // Gap ancestor: no node, but the chain carries on upward.
                continue;
            }

            let parent_name = relative_name(&self.root, dir);
            let parent = nodes
                .entry(parent_name.clone())
                .or_insert_with(|| Node::new(parent_name.clone(), data.clone()));
            parent.add_child(&child_name);
            child_name = parent_name;
        }

        Ok(())
    }
}

/// Collate `root` for a single indicator pattern.
pub fn parse_nested_tree(root: &Path, indicator: &str) -> Result<NodeMap, CollateError> {
    Collator::new(root)?.collate(indicator)
}

/// `/`-joined path of `dir` relative to `root`; the root itself is `.`.
fn relative_name(root: &Path, dir: &Path) -> String {
    let relative = dir.strip_prefix(root).unwrap_or(dir);
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

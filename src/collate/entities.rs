//! Entity categories of the registry and the combined collation document.

use super::tree::{Collator, NodeMap};
use crate::error::CollateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Registry entity category, each marked by its own indicator file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Dataset,
    Task,
    Model,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Dataset, EntityKind::Task, EntityKind::Model];

    /// File whose presence marks a leaf of this kind.
    pub fn indicator(&self) -> &'static str {
        match self {
            EntityKind::Dataset => "dataset.yaml",
            EntityKind::Task => "task.yaml",
            EntityKind::Model => "model.yaml",
        }
    }

    /// Plural key used in the combined document.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Dataset => "datasets",
            EntityKind::Task => "tasks",
            EntityKind::Model => "models",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Dataset => "dataset",
            EntityKind::Task => "task",
            EntityKind::Model => "model",
        };
        f.write_str(name)
    }
}

/// All three entity mappings for one registry root.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntityCollection {
    pub datasets: NodeMap,
    pub tasks: NodeMap,
    pub models: NodeMap,
}

impl EntityCollection {
    pub fn get(&self, kind: EntityKind) -> &NodeMap {
        match kind {
            EntityKind::Dataset => &self.datasets,
            EntityKind::Task => &self.tasks,
            EntityKind::Model => &self.models,
        }
    }

    fn set(&mut self, kind: EntityKind, nodes: NodeMap) {
        match kind {
            EntityKind::Dataset => self.datasets = nodes,
            EntityKind::Task => self.tasks = nodes,
            EntityKind::Model => self.models = nodes,
        }
    }
}

/// Collate a single entity kind under `root`.
pub fn collate_kind(root: &Path, kind: EntityKind) -> Result<NodeMap, CollateError> {
    Collator::new(root)?.collate(kind.indicator())
}

/// Collate every entity kind under `root`, sharing directory reads between kinds.
pub fn collate_entities(root: &Path) -> Result<EntityCollection, CollateError> {
    let indicators = EntityKind::ALL.map(|kind| kind.indicator());
    let maps = Collator::new(root)?.collate_all(&indicators)?;
    let mut collection = EntityCollection::default();
    for (kind, nodes) in EntityKind::ALL.into_iter().zip(maps) {
        collection.set(kind, nodes);
    }
    Ok(collection)
}

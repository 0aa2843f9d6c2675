//! Registry tree collation: dataset, task and model definitions into JSON-ready nodes.

mod entities;
mod node;
mod readers;
mod tree;

pub use crate::error::CollateError;
pub use entities::{collate_entities, collate_kind, EntityCollection, EntityKind};
pub use node::{LeafData, Node};
pub use readers::{full_suffix, parse_requirements, reader_for, FileContent, FileReader, ReaderKind, FILE_READERS};
pub use tree::{parse_nested_tree, Collator, NodeMap};

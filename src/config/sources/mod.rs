//! Individual configuration sources, each layered onto a builder.

pub mod environment;
pub mod global_file;
pub mod workspace_file;

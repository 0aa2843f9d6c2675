//! Benchreg: Benchmark Registry Utilities
//!
//! Collates dataset, task and model definitions from a registry directory tree
//! into JSON for a web front-end, aggregates per-submission result blurbs into
//! a single results file, and packages individual evaluation results.

pub mod aggregate;
pub mod collate;
pub mod config;
pub mod error;
pub mod logging;
pub mod package;
pub mod tooling;

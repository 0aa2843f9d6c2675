//! Tooling & Integration Layer
//!
//! The `benchreg` command line: argument parsing, command dispatch, and
//! text formatting of command results.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};

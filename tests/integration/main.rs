//! Integration tests for the benchmark registry utilities

mod cli_contracts;
mod collate_tree;
mod support;

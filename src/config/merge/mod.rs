//! Source composition and deserialization.

pub mod merge_policy;
pub mod service;

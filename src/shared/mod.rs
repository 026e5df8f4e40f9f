//! Shared utilities used across the crate

pub mod glob;

pub use glob::{PatternSet, process_ignore_patterns};

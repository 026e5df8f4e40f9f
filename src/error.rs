//! Fatal error taxonomy
//!
//! Only conditions that abort a run live here. Per-file problems are recorded as
//! [`Warning`](crate::walker::Warning)s and never surface as errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreecatError {
    #[error("input directory does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("output file {} already exists and overwrite is disabled", .0.display())]
    OutputExists(PathBuf),

    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

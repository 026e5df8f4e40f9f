//! # treecat - directory tree concatenation
//!
//! Walks a directory, decides per path whether to include it, and writes the content of
//! every included file into one or more size-bounded output files.
//!
//! ## Features
//!
//! - **Glob filtering**: exclude patterns from flags and an ignore file, with explicit
//!   include patterns that always win
//! - **Content policies**: hidden paths, binary detection by sampling, size limits
//! - **Chunked output**: split output across N files of roughly equal size
//! - **Lossy compression**: five levels of textual heuristics to shrink output
//!
//! ## Quick Start
//!
//! ```bash
//! # Everything under src/ except logs, in three chunks
//! treecat -i src -s "*.log" -k 3 -o context.txt
//!
//! # Would this path be included?
//! treecat -s "target/" -t target/debug/app
//! ```

pub mod cli;
pub mod compress;
pub mod config;
pub mod error;
pub mod filters;
pub mod shared;
pub mod sink;
pub mod walker;

pub use cli::{Cli, Output};
pub use compress::{CompressionLevel, compress};
pub use config::TreecatConfig;
pub use error::TreecatError;
pub use walker::TreeWalker;

/// Result type alias for treecat operations
pub type Result<T> = anyhow::Result<T>;

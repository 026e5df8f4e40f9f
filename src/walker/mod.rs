pub mod core;
pub mod directory;
pub mod types;

pub use self::core::{READ_ERROR_PREFIX, TreeWalker};
pub use types::{DryRunReport, FileEntry, RunReport, RunStats, Warning, WarningCategory};

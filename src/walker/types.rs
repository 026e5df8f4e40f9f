use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Counters for one run
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunStats {
    pub directories_included: usize,
    pub directories_excluded: usize,
    pub files_included: usize,
    pub files_excluded: usize,
    pub files_failed: usize,
    pub bytes_written: u64,
    pub chunks_written: usize,
    pub duration_ms: u64,
}

/// Warning generated during a run. The run continues past every warning.
#[derive(Debug, Clone, Serialize)]
pub struct Warning {
    pub message: String,
    pub category: WarningCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningCategory {
    /// File could not be read or was over the size limit
    FileRead,
    /// Content sampling failed; file was treated as binary
    Classification,
    /// Directory enumeration error
    Walk,
}

impl fmt::Display for WarningCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileRead => f.write_str("file read"),
            Self::Classification => f.write_str("classification"),
            Self::Walk => f.write_str("walk"),
        }
    }
}

/// Result of a run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub stats: RunStats,
    pub warnings: Vec<Warning>,
    pub destinations: Vec<String>,
}

/// A file found during discovery
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Path on disk
    pub path: PathBuf,
    /// Path relative to the input root, `/`-separated
    pub relative: String,
    /// Size reported by the filesystem at discovery time
    pub size: u64,
}

/// Answer to a single-path inclusion query
#[derive(Debug, Clone, Serialize)]
pub struct DryRunReport {
    pub path: String,
    pub is_dir: bool,
    pub included: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

//! Inclusion decisions for directories and files
//!
//! Filters are applied in this order:
//! 1. **Path filter** - hidden-file policy, then explicit include, then exclude globs
//! 2. **Binary filter** - content sampling (files only, skipped when binaries are allowed)
//! 3. **Size filter** - configured maximum (files only)
//!
//! The path filter is pure. The binary filter reads at most [`binary::SAMPLE_SIZE`] bytes.

pub mod binary;
pub mod path;
pub mod size;

pub use binary::BinaryFilter;
pub use path::PathFilter;
pub use size::SizeFilter;

use crate::config::TreecatConfig;
use crate::shared::PatternSet;
use anyhow::Result;
use std::fmt;
use std::path::Path;

/// Common trait for all filters
pub trait Filter {
    /// Input type for the filter
    type Input: ?Sized;

    /// Apply the filter to the input
    fn filter(&self, input: &Self::Input) -> Result<FilterDecision>;

    /// Get the name of this filter for debugging/logging
    fn name(&self) -> &'static str;
}

/// Why a path was left out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Final path segment starts with `.` and hidden files are ignored
    Hidden,
    /// Matched an exclude pattern and no include pattern
    Excluded,
    /// Content sampling classified the file as binary
    Binary,
    /// Content sampling failed; treated as binary
    Unclassifiable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hidden => f.write_str("hidden"),
            Self::Excluded => f.write_str("excluded by pattern"),
            Self::Binary => f.write_str("binary content"),
            Self::Unclassifiable(reason) => write!(f, "could not classify content: {}", reason),
        }
    }
}

/// Outcome of running a path through the filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterDecision {
    /// Process this file/directory
    Include,
    /// Skip this file/directory with reason
    Exclude(SkipReason),
    /// File passes every other check but is larger than the configured maximum
    Oversized { size: u64, limit: u64 },
}

impl FilterDecision {
    pub fn is_include(&self) -> bool {
        matches!(self, Self::Include)
    }
}

/// Resolved inclusion settings for one run
#[derive(Debug, Clone)]
pub struct InclusionPolicy {
    pub exclude: PatternSet,
    pub include: PatternSet,
    pub ignore_hidden: bool,
    pub include_binary: bool,
    pub max_file_size: Option<u64>,
}

impl InclusionPolicy {
    /// Build the policy from configuration, merging the ignore file into the excludes
    pub fn from_config(config: &TreecatConfig) -> Result<Self> {
        let exclude = PatternSet::new(config.effective_exclude_patterns()?)?;
        let include = PatternSet::from_text(&config.include)?;

        tracing::debug!(
            "Inclusion policy: {} exclude, {} include patterns, hidden={}, binary={}, max_size={:?}",
            exclude.len(),
            include.len(),
            config.ignore_hidden,
            config.include_binary,
            config.max_file_size
        );

        Ok(Self {
            exclude,
            include,
            ignore_hidden: config.ignore_hidden,
            include_binary: config.include_binary,
            max_file_size: config.max_file_size,
        })
    }
}

/// Combines the path, binary and size filters into one decision function
pub struct InclusionEngine {
    path_filter: PathFilter,
    binary_filter: BinaryFilter,
    size_filter: SizeFilter,
}

impl InclusionEngine {
    pub fn new(policy: InclusionPolicy) -> Self {
        Self {
            path_filter: PathFilter::new(policy.include, policy.exclude, policy.ignore_hidden),
            binary_filter: BinaryFilter::new(policy.include_binary),
            size_filter: SizeFilter::new(policy.max_file_size),
        }
    }

    pub fn includes(&self) -> &PatternSet {
        self.path_filter.includes()
    }

    pub fn excludes(&self) -> &PatternSet {
        self.path_filter.excludes()
    }

    /// Decide on a path using only hidden-file and glob rules. No I/O.
    pub fn decide_path(&self, relative: &str, is_dir: bool) -> FilterDecision {
        let key = path::match_key(relative, is_dir);
        let decision = self
            .path_filter
            .filter(key.as_str())
            .unwrap_or(FilterDecision::Include);
        tracing::trace!("{} -> {:?}", key, decision);
        decision
    }

    /// Full file decision: path rules, then content sampling, then size
    pub fn decide_file(&self, relative: &str, file: &Path, size: u64) -> FilterDecision {
        let decision = self.decide_path(relative, false);
        if !decision.is_include() {
            return decision;
        }

        let decision = match self.binary_filter.filter(file) {
            Ok(FilterDecision::Include) => self
                .size_filter
                .filter(&size)
                .unwrap_or(FilterDecision::Include),
            Ok(skip) => skip,
            Err(e) => {
                tracing::warn!("Error determining file type for {}: {:#}", file.display(), e);
                FilterDecision::Exclude(SkipReason::Unclassifiable(format!("{:#}", e)))
            }
        };

        tracing::trace!("{} -> {:?}", relative, decision);
        decision
    }

    /// Boolean inclusion verdict. `is_binary`/`size` are only consulted for files.
    pub fn should_include(
        &self,
        relative: &str,
        is_dir: bool,
        is_binary: Option<bool>,
        size: Option<u64>,
    ) -> bool {
        if !self.decide_path(relative, is_dir).is_include() {
            return false;
        }
        if is_dir {
            return true;
        }
        if is_binary == Some(true) && !self.binary_filter.allows_binary() {
            return false;
        }
        match size {
            Some(size) => self.size_filter.permits(size),
            None => true,
        }
    }
}

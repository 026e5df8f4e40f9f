//! Hidden-file and glob based path filtering

use super::{Filter, FilterDecision, SkipReason};
use crate::shared::PatternSet;
use anyhow::Result;

/// Path filter combining hidden-file policy with include/exclude pattern sets
///
/// Include patterns override exclude patterns. The hidden-file check runs first and
/// cannot be overridden.
pub struct PathFilter {
    include: PatternSet,
    exclude: PatternSet,
    ignore_hidden: bool,
}

impl PathFilter {
    pub fn new(include: PatternSet, exclude: PatternSet, ignore_hidden: bool) -> Self {
        Self {
            include,
            exclude,
            ignore_hidden,
        }
    }

    pub fn includes(&self) -> &PatternSet {
        &self.include
    }

    pub fn excludes(&self) -> &PatternSet {
        &self.exclude
    }
}

impl Filter for PathFilter {
    type Input = str;

    /// `key` is a normalized relative path, with a trailing `/` for directories
    fn filter(&self, key: &str) -> Result<FilterDecision> {
        if self.ignore_hidden && is_hidden(key) {
            return Ok(FilterDecision::Exclude(SkipReason::Hidden));
        }

        if self.include.is_match(key) || !self.exclude.is_match(key) {
            Ok(FilterDecision::Include)
        } else {
            Ok(FilterDecision::Exclude(SkipReason::Excluded))
        }
    }

    fn name(&self) -> &'static str {
        "PathFilter"
    }
}

/// Strip leading `./` and use `/` as separator
pub fn normalize(path: &str) -> String {
    let mut normalized = path.replace('\\', "/");
    while let Some(rest) = normalized.strip_prefix("./") {
        normalized = rest.to_string();
    }
    normalized
}

/// The string matched against globs: directories carry a trailing separator
pub fn match_key(relative: &str, is_dir: bool) -> String {
    let mut key = normalize(relative);
    if is_dir && !key.ends_with('/') {
        key.push('/');
    }
    key
}

/// True when the final path segment starts with `.`
pub fn is_hidden(key: &str) -> bool {
    key.trim_end_matches('/')
        .rsplit('/')
        .next()
        .is_some_and(|segment| segment.starts_with('.'))
}

//! Glob pattern utilities
//!
//! This module wraps `globset` into the pattern sets used by the inclusion engine.
//! Paths handed to [`PatternSet::is_match`] are relative to the input root and use
//! `/` as separator; directories carry a trailing `/`.

use crate::error::TreecatError;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// An immutable, compiled set of glob patterns
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<String>,
    matcher: GlobSet,
}

impl PatternSet {
    /// Compile a set of patterns. Blank entries are discarded.
    ///
    /// A pattern ending in `/` is directory-scoped: it matches the directory itself
    /// and everything beneath it.
    pub fn new<I, S>(patterns: I) -> Result<Self, TreecatError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns: Vec<String> = patterns
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            let glob = GlobBuilder::new(&expand_directory_pattern(pattern))
                .literal_separator(true)
                .build()
                .map_err(|source| TreecatError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?;
            builder.add(glob);
        }

        let matcher = builder.build().map_err(|source| TreecatError::InvalidPattern {
            pattern: patterns.join(" "),
            source,
        })?;

        tracing::debug!("Compiled {} glob patterns into GlobSet", patterns.len());
        Ok(Self { patterns, matcher })
    }

    /// Compile patterns from free text separated by spaces, tabs or newlines
    pub fn from_text(text: &str) -> Result<Self, TreecatError> {
        Self::new(text.split_whitespace())
    }

    /// An empty set that never matches
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            matcher: GlobSet::empty(),
        }
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }

    /// Source patterns in the order they were given
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}

/// `target/` becomes `target/**` so the directory and its contents both match
fn expand_directory_pattern(pattern: &str) -> String {
    if pattern.ends_with('/') {
        format!("{}**", pattern)
    } else {
        pattern.to_string()
    }
}

/// Process ignore-file content into pattern text (drops comments and blank lines)
pub fn process_ignore_patterns(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(str::to_string))
        .collect()
}

//! Lossy text compression pipeline
//!
//! Each [`CompressionLevel`] names a fixed, ordered table of [`Stage`]s. Compression is a
//! fold over that table: line stages run on every `\n`-separated line, text stages run on
//! the whole block. The stages are textual heuristics and may alter meaning.

pub mod stages;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity tier selecting which stages run
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    /// Output is left untouched
    None,
    /// Comments and redundant whitespace only
    #[default]
    Low,
    /// Adds placeholder substitution and abbreviations
    Medium,
    /// Adds path shortening
    High,
    /// Everything, including line truncation and dropping non-essential lines
    Extreme,
}

/// Whether a stage sees one line or the whole text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageScope {
    Line,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    RemoveComments,
    CompressWhitespace,
    ShortenPath,
    RemoveRepetitiveInfo,
    TruncateLongLines,
    AbbreviateCommonWords,
    RemoveNonEssentialInformation,
    SummarizeRepeatedPatterns,
}

use Stage::*;

const LOW: &[Stage] = &[RemoveComments, CompressWhitespace];
const MEDIUM: &[Stage] = &[
    RemoveComments,
    CompressWhitespace,
    RemoveRepetitiveInfo,
    AbbreviateCommonWords,
];
const HIGH: &[Stage] = &[
    RemoveComments,
    CompressWhitespace,
    ShortenPath,
    RemoveRepetitiveInfo,
    AbbreviateCommonWords,
];
const EXTREME: &[Stage] = &[
    RemoveComments,
    CompressWhitespace,
    ShortenPath,
    RemoveRepetitiveInfo,
    TruncateLongLines,
    AbbreviateCommonWords,
    RemoveNonEssentialInformation,
    SummarizeRepeatedPatterns,
];

impl CompressionLevel {
    /// The ordered stage table for this level
    pub fn stages(self) -> &'static [Stage] {
        match self {
            Self::None => &[],
            Self::Low => LOW,
            Self::Medium => MEDIUM,
            Self::High => HIGH,
            Self::Extreme => EXTREME,
        }
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Extreme => "extreme",
        };
        f.write_str(name)
    }
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            RemoveComments => "remove_comments",
            CompressWhitespace => "compress_whitespace",
            ShortenPath => "shorten_path",
            RemoveRepetitiveInfo => "remove_repetitive_info",
            TruncateLongLines => "truncate_long_lines",
            AbbreviateCommonWords => "abbreviate_common_words",
            RemoveNonEssentialInformation => "remove_non_essential_information",
            SummarizeRepeatedPatterns => "summarize_repeated_patterns",
        }
    }

    pub fn scope(self) -> StageScope {
        match self {
            RemoveNonEssentialInformation | SummarizeRepeatedPatterns => StageScope::Text,
            _ => StageScope::Line,
        }
    }

    fn transform(self) -> fn(&str) -> String {
        match self {
            RemoveComments => stages::remove_comments,
            CompressWhitespace => stages::compress_whitespace,
            ShortenPath => stages::shorten_path,
            RemoveRepetitiveInfo => stages::remove_repetitive_info,
            TruncateLongLines => stages::truncate_long_lines,
            AbbreviateCommonWords => stages::abbreviate_common_words,
            RemoveNonEssentialInformation => stages::remove_non_essential_information,
            SummarizeRepeatedPatterns => stages::summarize_repeated_patterns,
        }
    }

    /// Apply this stage to `text`, honoring its scope
    pub fn apply(self, text: &str) -> String {
        let transform = self.transform();
        match self.scope() {
            StageScope::Text => transform(text),
            StageScope::Line => text.split('\n').map(transform).collect::<Vec<_>>().join("\n"),
        }
    }
}

/// Compress `text` at `level`. [`CompressionLevel::None`] returns the input unchanged.
pub fn compress(text: &str, level: CompressionLevel) -> String {
    level
        .stages()
        .iter()
        .fold(text.to_string(), |acc, stage| stage.apply(&acc))
}

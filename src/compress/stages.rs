//! Individual compression stages.
//!
//! Every stage is a pure `&str -> String` transform. Line stages expect a single line;
//! text stages receive a whole multi-line block.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Maximum characters kept by [`truncate_long_lines`]
pub const MAX_LINE_LENGTH: usize = 100;

static RE_LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"//.*$").unwrap());
static RE_BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/\*.*?\*/").unwrap());
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static RE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+\.\d+(\.\d+)?").unwrap());
static RE_GUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-fA-F0-9]{8}-([a-fA-F0-9]{4}-){3}[a-fA-F0-9]{12}").unwrap()
});
static RE_TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}").unwrap());
static RE_ACCESSOR_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(get|set|on|handle)([A-Z])").unwrap());
static RE_LONG_STRING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""[^"]{20,}""#).unwrap());
static RE_LARGE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{5,}\b").unwrap());

/// Abbreviation dictionary, in replacement priority order
pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("function", "func"),
    ("string", "str"),
    ("number", "num"),
    ("array", "arr"),
    ("object", "obj"),
    ("parameter", "param"),
    ("return", "ret"),
    ("class", "cls"),
    ("interface", "iface"),
    ("implements", "impl"),
    ("constructor", "ctor"),
    ("private", "priv"),
    ("protected", "prot"),
    ("public", "pub"),
    ("static", "stat"),
    ("property", "prop"),
    ("method", "meth"),
];

// Single alternation so a replacement is never re-matched by a later entry
static RE_ABBREVIATIONS: LazyLock<Regex> = LazyLock::new(|| {
    let words: Vec<&str> = ABBREVIATIONS.iter().map(|(word, _)| *word).collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", words.join("|"))).unwrap()
});

static RE_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:(?:using|import|use)\b|#\s*include\b)").unwrap());
static RE_CONSOLE_OUTPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:Console\.Write(?:Line)?|console\.(?:log|info|warn|error|debug)|System\.out\.print(?:ln)?|e?println!|e?print!|print)\s*\(").unwrap()
});
static RE_ERROR_HANDLING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Exception|\btry\b|\bcatch\b").unwrap());

/// Strip `//` line comments, then `/* */` block comments closed on the same line.
///
/// String literals are not understood: a `//` inside quotes is treated as a comment.
pub fn remove_comments(line: &str) -> String {
    let line = RE_LINE_COMMENT.replace(line, "");
    RE_BLOCK_COMMENT.replace_all(&line, "").into_owned()
}

pub fn compress_whitespace(line: &str) -> String {
    RE_WHITESPACE.replace_all(line, " ").trim().to_string()
}

/// `a/b/c/d` becomes `a/.../d`; fewer than three segments pass through
pub fn shorten_path(line: &str) -> String {
    let parts: Vec<&str> = line
        .split(['/', '\\'])
        .filter(|part| !part.is_empty())
        .collect();

    match parts.as_slice() {
        [first, .., last] if parts.len() > 2 => format!("{}/.../{}", first, last),
        _ => line.to_string(),
    }
}

pub fn remove_repetitive_info(line: &str) -> String {
    let line = RE_VERSION.replace_all(line, "X.X.X");
    let line = RE_GUID.replace_all(&line, "GUID");
    let line = RE_TIMESTAMP.replace_all(&line, "TIMESTAMP");
    let line = RE_ACCESSOR_PREFIX.replace_all(&line, "$2");
    let line = RE_LONG_STRING.replace_all(&line, "\"...\"");
    RE_LARGE_NUMBER.replace_all(&line, "LARGENUM").into_owned()
}

pub fn abbreviate_common_words(line: &str) -> String {
    RE_ABBREVIATIONS
        .replace_all(line, |caps: &Captures| {
            let word = caps[0].to_ascii_lowercase();
            ABBREVIATIONS
                .iter()
                .find(|(full, _)| *full == word)
                .map(|(_, short)| (*short).to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

pub fn truncate_long_lines(line: &str) -> String {
    match line.char_indices().nth(MAX_LINE_LENGTH) {
        Some((cut, _)) => format!("{}...", &line[..cut]),
        None => line.to_string(),
    }
}

/// Drop blank lines, import directives, line comments, console output and error handling
pub fn remove_non_essential_information(text: &str) -> String {
    text.split('\n')
        .filter(|line| {
            let trimmed = line.trim_start();
            !trimmed.trim().is_empty()
                && !trimmed.starts_with("//")
                && !RE_DIRECTIVE.is_match(trimmed)
                && !RE_CONSOLE_OUTPUT.is_match(trimmed)
                && !RE_ERROR_HANDLING.is_match(line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapse runs of identical lines into the first line plus a repeat marker
pub fn summarize_repeated_patterns(text: &str) -> String {
    let mut summarized: Vec<String> = Vec::new();
    let mut lines = text.split('\n').peekable();

    while let Some(line) = lines.next() {
        let mut run = 1;
        while lines.peek() == Some(&line) {
            lines.next();
            run += 1;
        }

        summarized.push(line.to_string());
        if run > 1 {
            summarized.push(format!("[Previous line repeated {} times]", run));
        }
    }

    summarized.join("\n")
}

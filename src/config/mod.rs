//! Configuration management for treecat
//!
//! Settings are layered with figment, lowest priority first:
//! compiled defaults, config file(s), `TREECAT_*` environment variables, CLI flags.

use crate::compress::CompressionLevel;
use crate::error::TreecatError;
use crate::shared::process_ignore_patterns;
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "TREECAT_";

/// Main configuration structure for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreecatConfig {
    /// Include files classified as binary
    pub include_binary: bool,

    /// Exclude patterns, whitespace separated
    pub skip: String,

    /// Output file; chunk files are named after it
    pub output: PathBuf,

    /// Root directory to walk
    pub input: PathBuf,

    /// Replace an existing output file
    pub overwrite: bool,

    /// File holding extra exclude patterns (missing is fine)
    pub ignore_file: PathBuf,

    /// Explicit include patterns; these override excludes
    pub include: String,

    /// Only report the decision for this path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,

    /// Write to stdout instead of the output file
    pub stdout: bool,

    /// Maximum file size in bytes (unbounded when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<u64>,

    /// Number of chunk files to split output across
    pub chunks: usize,

    /// Skip paths whose final segment starts with `.`
    pub ignore_hidden: bool,

    /// Run the compression pipeline over written output
    pub compress: bool,

    /// Level used when `compress` is set
    pub compression_level: CompressionLevel,
}

impl Default for TreecatConfig {
    fn default() -> Self {
        Self {
            include_binary: false,
            skip: String::new(),
            output: PathBuf::from("./output.txt"),
            input: PathBuf::from("."),
            overwrite: true,
            ignore_file: PathBuf::from("~/.treecatignore"),
            include: String::new(),
            test: None,
            stdout: false,
            max_file_size: None,
            chunks: 1,
            ignore_hidden: false,
            compress: false,
            compression_level: CompressionLevel::default(),
        }
    }
}

/// Values given explicitly on the command line. Absent fields leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_binary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunks: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compress: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression_level: Option<CompressionLevel>,
}

impl TreecatConfig {
    /// Load the layered configuration.
    ///
    /// With `custom_config`, only that file is read (format picked by extension).
    /// Otherwise the user config and `treecat.{toml,yaml,yml,json}` in the working
    /// directory are merged, in that order.
    pub fn load(custom_config: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(TreecatConfig::default()));

        if let Some(custom_path) = custom_config {
            if !custom_path.exists() {
                tracing::warn!("Config file {} not found, using defaults", custom_path.display());
            }
            figment = match custom_path.extension().and_then(|ext| ext.to_str()) {
                Some("yaml" | "yml") => figment.merge(Yaml::file(custom_path)),
                Some("json") => figment.merge(Json::file(custom_path)),
                _ => figment.merge(Toml::file(custom_path)),
            };
        } else {
            figment = figment
                .merge(Toml::file(Self::user_config_path()))
                .merge(Toml::file("treecat.toml"))
                .merge(Yaml::file("treecat.yaml"))
                .merge(Yaml::file("treecat.yml"))
                .merge(Json::file("treecat.json"));
        }

        let config: TreecatConfig = figment
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
            .extract()
            .context("Failed to load configuration")?;

        config.validate()?;
        tracing::debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let writes_file = !self.stdout && self.test.is_none();
        if writes_file && self.output.file_name().is_none() {
            return Err(TreecatError::InvalidConfig(format!(
                "output path '{}' does not name a file",
                self.output.display()
            ))
            .into());
        }
        Ok(())
    }

    /// Compression level to apply, `None` when compression is off
    pub fn compression(&self) -> CompressionLevel {
        if self.compress {
            self.compression_level
        } else {
            CompressionLevel::None
        }
    }

    /// Requested chunk count, at least one
    pub fn chunk_count(&self) -> usize {
        self.chunks.max(1)
    }

    /// The ignore file with `~` expanded
    pub fn ignore_file_path(&self) -> PathBuf {
        expand_home(&self.ignore_file)
    }

    /// Exclude patterns from `skip` followed by those from the ignore file
    pub fn effective_exclude_patterns(&self) -> Result<Vec<String>> {
        let mut patterns: Vec<String> = self.skip.split_whitespace().map(str::to_string).collect();

        let ignore_path = self.ignore_file_path();
        if ignore_path.is_file() {
            let content = std::fs::read_to_string(&ignore_path).with_context(|| {
                format!("Failed to read ignore file: {}", ignore_path.display())
            })?;
            let ignore_patterns = process_ignore_patterns(&content);
            tracing::debug!(
                "Loaded {} patterns from {}",
                ignore_patterns.len(),
                ignore_path.display()
            );
            patterns.extend(ignore_patterns);
        } else {
            tracing::debug!("No ignore file at {}", ignore_path.display());
        }

        Ok(patterns)
    }

    fn user_config_path() -> PathBuf {
        expand_home(Path::new("~/.config/treecat/config.toml"))
    }
}

/// Expand a leading `~` to `$HOME`
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(rest),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests;

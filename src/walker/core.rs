use super::directory::{DirectoryListing, discover};
use super::types::{DryRunReport, FileEntry, RunReport, RunStats, Warning, WarningCategory};
use crate::config::TreecatConfig;
use crate::error::TreecatError;
use crate::filters::{FilterDecision, InclusionEngine, InclusionPolicy, SkipReason};
use crate::sink::{ChunkedWriter, FileChunks, OutputSink, StdoutSink};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Prefix of the line that replaces unreadable or oversized content
pub const READ_ERROR_PREFIX: &str = "Error reading file: ";

/// A file that survived directory filtering, with its decision
struct PlannedFile {
    entry: FileEntry,
    decision: FilterDecision,
}

/// Walks the input tree and concatenates included files into a sink
pub struct TreeWalker {
    config: TreecatConfig,
    engine: InclusionEngine,
}

impl TreeWalker {
    pub fn new(config: &TreecatConfig) -> Result<Self> {
        let policy = InclusionPolicy::from_config(config)?;
        Ok(Self {
            config: config.clone(),
            engine: InclusionEngine::new(policy),
        })
    }

    /// Run against the configured destination: stdout, or the chunk files
    pub fn run(&self) -> Result<RunReport> {
        self.check_setup()?;

        if self.config.stdout {
            let mut sink = StdoutSink::stdout();
            return self.run_with_sink(&mut sink);
        }

        let start_time = Instant::now();
        let mut warnings = Vec::new();
        let mut stats = RunStats::default();
        let plan = self.plan(&mut stats, &mut warnings);

        let mut sink = ChunkedWriter::new(
            FileChunks::new(&self.config.output),
            eligible_bytes(&plan),
            self.config.chunk_count(),
            self.config.compression(),
        );
        self.emit_plan(plan, &mut sink, stats, warnings, start_time)
    }

    /// Run against an arbitrary sink, skipping the output-exists check
    pub fn run_with_sink(&self, sink: &mut dyn OutputSink) -> Result<RunReport> {
        self.check_input()?;
        let start_time = Instant::now();
        let mut warnings = Vec::new();
        let mut stats = RunStats::default();
        let plan = self.plan(&mut stats, &mut warnings);
        self.emit_plan(plan, sink, stats, warnings, start_time)
    }

    /// Decide a single path without touching the filesystem
    pub fn dry_run(&self, candidate: &str) -> DryRunReport {
        let trimmed = candidate.trim();
        let is_dir = trimmed.ends_with('/') || trimmed.ends_with('\\');
        let path = trimmed
            .trim_start_matches("./")
            .trim_end_matches(['/', '\\'])
            .to_string();

        let decision = self.engine.decide_path(&path, is_dir);
        let reason = match &decision {
            FilterDecision::Exclude(reason) => Some(reason.to_string()),
            _ => None,
        };

        DryRunReport {
            path,
            is_dir,
            included: decision.is_include(),
            reason,
            include_patterns: self.engine.includes().patterns().to_vec(),
            exclude_patterns: self.engine.excludes().patterns().to_vec(),
        }
    }

    fn check_input(&self) -> Result<()> {
        if !self.config.input.is_dir() {
            return Err(TreecatError::InputNotFound(self.config.input.clone()).into());
        }
        Ok(())
    }

    fn check_setup(&self) -> Result<()> {
        self.check_input()?;
        if !self.config.stdout && !self.config.overwrite && self.config.output.exists() {
            return Err(TreecatError::OutputExists(self.config.output.clone()).into());
        }
        Ok(())
    }

    /// Discover the tree and decide every directory and file
    fn plan(&self, stats: &mut RunStats, warnings: &mut Vec<Warning>) -> Vec<PlannedFile> {
        let root = self.config.input.as_path();
        let listing = discover(root, self.config.ignore_hidden, warnings);
        let artifacts = self.output_artifacts();

        let mut plan = Vec::new();
        for dir in self.included_directories(&listing, stats) {
            for entry in &listing.directories[dir] {
                if artifacts.as_ref().is_some_and(|a| a.contains(&entry.path)) {
                    tracing::debug!("Skipping own output file {}", entry.path.display());
                    continue;
                }

                let decision = self.engine.decide_file(&entry.relative, &entry.path, entry.size);
                if let FilterDecision::Exclude(reason) = &decision {
                    stats.files_excluded += 1;
                    if let SkipReason::Unclassifiable(message) = reason {
                        warnings.push(Warning {
                            message: format!(
                                "Could not classify {}, treating it as binary: {}",
                                entry.relative, message
                            ),
                            category: WarningCategory::Classification,
                        });
                    }
                    continue;
                }

                plan.push(PlannedFile {
                    entry: entry.clone(),
                    decision,
                });
            }
        }
        plan
    }

    /// Root first, then every subdirectory that passes the path rules
    fn included_directories<'a>(
        &self,
        listing: &'a DirectoryListing,
        stats: &mut RunStats,
    ) -> Vec<&'a str> {
        let mut included = vec![""];
        for dir in listing.subdirectories() {
            if self.engine.decide_path(dir, true).is_include() {
                stats.directories_included += 1;
                included.push(dir);
            } else {
                stats.directories_excluded += 1;
            }
        }
        included
    }

    /// Write every planned file, then close the sink
    fn emit_plan(
        &self,
        plan: Vec<PlannedFile>,
        sink: &mut dyn OutputSink,
        mut stats: RunStats,
        mut warnings: Vec<Warning>,
        start_time: Instant,
    ) -> Result<RunReport> {
        for planned in plan {
            let entry = &planned.entry;
            let content = match planned.decision {
                FilterDecision::Oversized { size, limit } => Err(format!(
                    "file size {} bytes exceeds the maximum of {} bytes",
                    size, limit
                )),
                _ => fs::read(&entry.path)
                    .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                    .map_err(|e| e.to_string()),
            };

            sink.emit(&entry.relative)?;
            match content {
                Ok(text) => {
                    sink.emit(&text)?;
                    stats.files_included += 1;
                }
                Err(message) => {
                    tracing::warn!("Error reading {}: {}", entry.relative, message);
                    sink.emit(&format!("{}{}", READ_ERROR_PREFIX, message))?;
                    stats.files_failed += 1;
                    warnings.push(Warning {
                        message: format!("{}: {}", entry.relative, message),
                        category: WarningCategory::FileRead,
                    });
                }
            }
            sink.emit("")?;
        }

        let summary = sink.finish().context("Failed to finish output")?;
        stats.bytes_written = summary.bytes_written;
        stats.chunks_written = summary.destinations.len();
        stats.duration_ms = start_time.elapsed().as_millis() as u64;

        tracing::info!(
            "Wrote {} files ({} bytes) to {} destination(s), {} excluded, {} failed",
            stats.files_included,
            stats.bytes_written,
            stats.chunks_written,
            stats.files_excluded,
            stats.files_failed
        );

        Ok(RunReport {
            stats,
            warnings,
            destinations: summary.destinations,
        })
    }

    fn output_artifacts(&self) -> Option<OutputArtifacts> {
        if self.config.stdout {
            return None;
        }
        let dir = fs::canonicalize(non_empty_parent(&self.config.output)).ok()?;
        let names = FileChunks::new(&self.config.output)
            .file_names(self.config.chunk_count())
            .into_iter()
            .collect();
        Some(OutputArtifacts { dir, names })
    }
}

/// Files this run may write, so they are never read back as input
struct OutputArtifacts {
    dir: PathBuf,
    names: HashSet<String>,
}

impl OutputArtifacts {
    fn contains(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        if !self.names.contains(name.to_string_lossy().as_ref()) {
            return false;
        }
        fs::canonicalize(non_empty_parent(path)).is_ok_and(|parent| parent == self.dir)
    }
}

fn non_empty_parent(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Bytes of every file whose content will be written
fn eligible_bytes(plan: &[PlannedFile]) -> u64 {
    plan.iter()
        .filter(|p| p.decision.is_include())
        .map(|p| p.entry.size)
        .sum()
}

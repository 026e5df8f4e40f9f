//! Command-line interface for treecat
//!
//! Flags map one-to-one onto [`TreecatConfig`] fields. Only flags given explicitly
//! override the config file and `TREECAT_*` environment variables.

use crate::compress::CompressionLevel;
use crate::config::{ConfigOverrides, TreecatConfig};
use crate::walker::TreeWalker;
use anyhow::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

mod output;
mod report;

pub use output::Output;
pub use report::OutputFormat;

/// Concatenate a directory tree into size-bounded text files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Include binary files
    #[arg(short = 'b', long = "binary")]
    pub include_binary: bool,

    /// Exclude patterns, separated by whitespace
    #[arg(short, long, value_name = "PATTERNS")]
    pub skip: Option<String>,

    /// Output file [default: ./output.txt]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Input directory [default: .]
    #[arg(short, long, value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Overwrite the output file if it exists [default: true]
    #[arg(short = 'f', long, value_name = "BOOL", action = ArgAction::Set)]
    pub overwrite: Option<bool>,

    /// File with additional exclude patterns [default: ~/.treecatignore]
    #[arg(short = 'c', long, value_name = "FILE")]
    pub ignore_file: Option<PathBuf>,

    /// Include patterns; these win over excludes
    #[arg(short = 'n', long, value_name = "PATTERNS")]
    pub include: Option<String>,

    /// Only report whether PATH would be included
    #[arg(short, long, value_name = "PATH")]
    pub test: Option<String>,

    /// Write to stdout instead of the output file
    #[arg(short = 'w', long)]
    pub stdout: bool,

    /// Maximum file size in bytes
    #[arg(short = 'z', long = "max-size", value_name = "BYTES")]
    pub max_file_size: Option<u64>,

    /// Number of chunk files to split the output across
    #[arg(short = 'k', long, value_name = "N")]
    pub chunks: Option<usize>,

    /// Ignore hidden files and directories
    #[arg(short = 'H', long)]
    pub ignore_hidden: bool,

    /// Compress the output
    #[arg(short = 'x', long)]
    pub compress: bool,

    /// Compression level
    #[arg(short = 'l', long = "level", value_enum, value_name = "LEVEL")]
    pub compression_level: Option<CompressionLevel>,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Summary format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);

        let config = TreecatConfig::load(self.config.as_deref(), &self.overrides())?;
        let walker = TreeWalker::new(&config)?;

        if let Some(candidate) = &config.test {
            let output = Output::new(self.verbose > 0, self.quiet);
            return report::print_dry_run(&walker.dry_run(candidate), self.format, &output);
        }

        // Content owns stdout in stdout mode
        let output = Output::new(self.verbose > 0, self.quiet).with_stderr(config.stdout);
        if config.stdout && config.compress {
            tracing::info!("Compression is not applied in stdout mode");
        }

        let report = walker.run()?;
        report::print_run_report(&report, self.format, &output)
    }

    /// Explicit flags only; boolean switches that were not given stay unset
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            include_binary: self.include_binary.then_some(true),
            skip: self.skip.clone(),
            output: self.output.clone(),
            input: self.input.clone(),
            overwrite: self.overwrite,
            ignore_file: self.ignore_file.clone(),
            include: self.include.clone(),
            test: self.test.clone(),
            stdout: self.stdout.then_some(true),
            max_file_size: self.max_file_size,
            chunks: self.chunks,
            ignore_hidden: self.ignore_hidden.then_some(true),
            compress: self.compress.then_some(true),
            compression_level: self.compression_level,
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => tracing_subscriber::EnvFilter::new("warn"),
        1 => tracing_subscriber::EnvFilter::new("info,ignore=warn,globset=warn"),
        2 => tracing_subscriber::EnvFilter::new("debug,ignore=warn,globset=warn"),
        _ => tracing_subscriber::EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

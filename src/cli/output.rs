//! Styled console output for treecat
//!
//! Status lines go to stdout by default. When concatenated content owns stdout,
//! [`Output::with_stderr`] moves everything to stderr.

use console::style;

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
    stderr: bool,
}

impl Output {
    /// Create a new output handler
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            stderr: false,
        }
    }

    /// Route all output to stderr
    pub fn with_stderr(mut self, stderr: bool) -> Self {
        self.stderr = stderr;
        self
    }

    fn line(&self, text: String) {
        if self.stderr {
            eprintln!("{}", text);
        } else {
            println!("{}", text);
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.line(format!("{} {}", style("✔").green(), message));
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        // Errors are always shown, even in quiet mode
        eprintln!("{} {}", style("✖").red(), message);
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            self.line(format!("{} {}", style("⚠").yellow(), message));
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.line(format!("{} {}", style("ℹ").blue(), message));
        }
    }

    /// Print summary statistics (verbose only)
    pub fn summary_stats(&self, label: &str, value: impl ToString) {
        if self.verbose && !self.quiet {
            self.line(format!(
                "  {} {}",
                style(label).dim(),
                style(value.to_string()).bold()
            ));
        }
    }

    /// Print a key-value pair with consistent styling
    pub fn key_value(&self, key: &str, value: &str, highlight: bool) {
        if !self.quiet {
            let styled_value = if highlight {
                style(value).green().bold()
            } else {
                style(value).white()
            };
            self.line(format!("  {} {}", style(key).dim(), styled_value));
        }
    }

    /// Print machine-readable text; never suppressed
    pub fn raw(&self, text: &str) {
        self.line(text.to_string());
    }
}

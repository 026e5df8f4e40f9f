//! Output destinations for concatenated content
//!
//! Every destination implements [`OutputSink`]. [`StdoutSink`] streams raw lines to any
//! writer; [`ChunkedWriter`] splits lines across size-bounded chunk files and runs the
//! compression pipeline over each one.

pub mod chunked;

pub use chunked::{ChunkState, ChunkTarget, ChunkedWriter, FileChunks, target_chunk_size};

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, Write};

/// What a sink wrote over its lifetime
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SinkSummary {
    pub bytes_written: u64,
    pub destinations: Vec<String>,
}

/// A line-oriented output destination
pub trait OutputSink {
    /// Write one logical line. A trailing `\n` is appended.
    fn emit(&mut self, line: &str) -> Result<()>;

    /// Flush and close every open destination
    fn finish(&mut self) -> Result<SinkSummary>;
}

/// Writes lines unchanged and unsplit
pub struct StdoutSink<W: Write> {
    writer: W,
    bytes_written: u64,
}

impl StdoutSink<io::StdoutLock<'static>> {
    pub fn stdout() -> Self {
        Self::new(io::stdout().lock())
    }
}

impl<W: Write> StdoutSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            bytes_written: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for StdoutSink<W> {
    fn emit(&mut self, line: &str) -> Result<()> {
        self.writer
            .write_all(line.as_bytes())
            .and_then(|()| self.writer.write_all(b"\n"))
            .context("Failed to write to stdout")?;
        self.bytes_written += line.len() as u64 + 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<SinkSummary> {
        self.writer.flush().context("Failed to flush stdout")?;
        Ok(SinkSummary {
            bytes_written: self.bytes_written,
            destinations: vec!["<stdout>".to_string()],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdout_sink_writes_raw_lines() -> Result<()> {
        let mut sink = StdoutSink::new(Vec::new());
        sink.emit("src/a.rs")?;
        sink.emit("fn main() {\n    // kept\n}")?;
        sink.emit("")?;

        let summary = sink.finish()?;
        let written = String::from_utf8(sink.into_inner())?;
        assert_eq!(written, "src/a.rs\nfn main() {\n    // kept\n}\n\n");
        assert_eq!(summary.bytes_written, written.len() as u64);
        assert_eq!(summary.destinations, vec!["<stdout>"]);
        Ok(())
    }
}

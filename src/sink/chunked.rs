//! Size-bounded chunk files
//!
//! The target chunk size is fixed up front from the total eligible bytes. Before each line
//! is written the writer checks whether it would overflow the current chunk and, if more
//! chunks are allowed, rotates to the next destination.

use super::{OutputSink, SinkSummary};
use crate::compress::{CompressionLevel, compress};
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// `ceil(total / chunks)`, or `None` (unbounded) for a single chunk
pub fn target_chunk_size(total_bytes: u64, chunks: usize) -> Option<u64> {
    if chunks <= 1 {
        return None;
    }
    Some(total_bytes.div_ceil(chunks as u64))
}

/// Opens the destination for a given chunk index
pub trait ChunkTarget {
    type Writer: Write;

    fn open(&mut self, index: usize) -> io::Result<Self::Writer>;

    /// Human readable name of chunk `index`
    fn describe(&self, index: usize) -> String;
}

/// Chunk files next to the configured output path.
///
/// Chunk 0 is the output path itself; chunk `i` inserts `i` before the extension,
/// so `out/all.txt` is followed by `out/all1.txt`, `out/all2.txt`, ...
#[derive(Debug, Clone)]
pub struct FileChunks {
    base: PathBuf,
}

impl FileChunks {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn path_for(&self, index: usize) -> PathBuf {
        if index == 0 {
            return self.base.clone();
        }
        let stem = self
            .base
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = match self.base.extension() {
            Some(ext) => format!("{}{}.{}", stem, index, ext.to_string_lossy()),
            None => format!("{}{}", stem, index),
        };
        self.base.with_file_name(name)
    }

    /// File names of the first `count` chunks
    pub fn file_names(&self, count: usize) -> Vec<String> {
        (0..count.max(1))
            .filter_map(|i| {
                self.path_for(i)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            })
            .collect()
    }
}

impl ChunkTarget for FileChunks {
    type Writer = BufWriter<File>;

    fn open(&mut self, index: usize) -> io::Result<Self::Writer> {
        let path = self.path_for(index);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        tracing::debug!("Opening chunk {} at {}", index, path.display());
        Ok(BufWriter::new(File::create(&path)?))
    }

    fn describe(&self, index: usize) -> String {
        self.path_for(index).display().to_string()
    }
}

/// Position of the writer within its chunk sequence
#[derive(Debug)]
pub struct ChunkState<W> {
    /// 0-based index of the current chunk
    pub index: usize,
    /// Bytes written to the current chunk
    pub written: u64,
    /// Rotation threshold, `None` when unbounded
    pub target: Option<u64>,
    destination: Option<W>,
}

impl<W: Write> ChunkState<W> {
    fn new(target: Option<u64>) -> Self {
        Self {
            index: 0,
            written: 0,
            target,
            destination: None,
        }
    }

    fn close(&mut self) -> io::Result<()> {
        match self.destination.take() {
            Some(mut writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

/// Streams lines into up to `max_chunks` destinations, compressing each line first
pub struct ChunkedWriter<T: ChunkTarget> {
    target: T,
    state: ChunkState<T::Writer>,
    max_chunks: usize,
    level: CompressionLevel,
    bytes_written: u64,
    destinations: Vec<String>,
}

impl<T: ChunkTarget> ChunkedWriter<T> {
    pub fn new(target: T, total_bytes: u64, chunks: usize, level: CompressionLevel) -> Self {
        let chunk_size = target_chunk_size(total_bytes, chunks);
        tracing::debug!(
            "Chunked writer: {} eligible bytes, {} chunk(s), target {:?}, compression {}",
            total_bytes,
            chunks,
            chunk_size,
            level
        );
        Self {
            target,
            state: ChunkState::new(chunk_size),
            max_chunks: chunks.max(1),
            level,
            bytes_written: 0,
            destinations: Vec::new(),
        }
    }

    pub fn state(&self) -> &ChunkState<T::Writer> {
        &self.state
    }

    /// Rotate only away from a chunk that already holds bytes
    fn should_rotate(&self, line_size: u64) -> bool {
        match self.state.target {
            Some(target) => {
                self.state.written > 0
                    && self.state.written + line_size > target
                    && self.state.index + 1 < self.max_chunks
            }
            None => false,
        }
    }

    fn rotate(&mut self) -> Result<()> {
        self.state
            .close()
            .with_context(|| format!("Failed to close {}", self.target.describe(self.state.index)))?;
        self.state.index += 1;
        self.state.written = 0;
        tracing::debug!("Rotated to chunk {}", self.state.index);
        Ok(())
    }

    fn destination(&mut self) -> Result<&mut T::Writer> {
        if self.state.destination.is_none() {
            let index = self.state.index;
            let writer = self
                .target
                .open(index)
                .with_context(|| format!("Failed to open {}", self.target.describe(index)))?;
            self.destinations.push(self.target.describe(index));
            self.state.destination = Some(writer);
        }
        self.state
            .destination
            .as_mut()
            .context("chunk destination not open")
    }
}

impl<T: ChunkTarget> OutputSink for ChunkedWriter<T> {
    fn emit(&mut self, line: &str) -> Result<()> {
        let text = match self.level {
            CompressionLevel::None => Cow::Borrowed(line),
            level => Cow::Owned(compress(line, level)),
        };
        let line_size = text.len() as u64 + 1;

        if self.should_rotate(line_size) {
            self.rotate()?;
        }

        let index = self.state.index;
        let writer = self.destination()?;
        writer
            .write_all(text.as_bytes())
            .and_then(|()| writer.write_all(b"\n"))
            .with_context(|| format!("Failed to write chunk {}", index))?;

        self.state.written += line_size;
        self.bytes_written += line_size;
        Ok(())
    }

    fn finish(&mut self) -> Result<SinkSummary> {
        if self.destinations.is_empty() {
            self.destination()?;
        }
        self.state
            .close()
            .with_context(|| format!("Failed to close {}", self.target.describe(self.state.index)))?;

        Ok(SinkSummary {
            bytes_written: self.bytes_written,
            destinations: self.destinations.clone(),
        })
    }
}

impl<T: ChunkTarget> Drop for ChunkedWriter<T> {
    fn drop(&mut self) {
        if let Err(e) = self.state.close() {
            tracing::warn!("Failed to flush chunk {} on drop: {}", self.state.index, e);
        }
    }
}

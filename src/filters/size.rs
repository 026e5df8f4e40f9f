//! File size filtering

use super::{Filter, FilterDecision};
use anyhow::Result;

/// Flags files larger than the configured maximum. `None` means unbounded.
pub struct SizeFilter {
    max_size_bytes: Option<u64>,
}

impl SizeFilter {
    pub fn new(max_size_bytes: Option<u64>) -> Self {
        Self { max_size_bytes }
    }

    pub fn permits(&self, size: u64) -> bool {
        self.max_size_bytes.is_none_or(|limit| size <= limit)
    }
}

impl Filter for SizeFilter {
    type Input = u64;

    fn filter(&self, size: &u64) -> Result<FilterDecision> {
        match self.max_size_bytes {
            Some(limit) if *size > limit => Ok(FilterDecision::Oversized { size: *size, limit }),
            _ => Ok(FilterDecision::Include),
        }
    }

    fn name(&self) -> &'static str {
        "SizeFilter"
    }
}

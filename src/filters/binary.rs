//! Binary file detection by content sampling

use super::{Filter, FilterDecision, SkipReason};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Bytes sampled from the start of each file
pub const SAMPLE_SIZE: usize = 1024;

/// A sample is binary when non-printable bytes exceed 3 in 10
const THRESHOLD_NUMERATOR: usize = 3;
const THRESHOLD_DENOMINATOR: usize = 10;

/// Printable ASCII plus `\n` and `\r`
pub fn is_printable(byte: u8) -> bool {
    matches!(byte, 0x20..=0x7E | 0x0A | 0x0D)
}

/// Classify a sample. Empty samples are text.
pub fn is_binary_sample(sample: &[u8]) -> bool {
    if sample.is_empty() {
        return false;
    }
    let non_printable = sample.iter().filter(|b| !is_printable(**b)).count();
    non_printable * THRESHOLD_DENOMINATOR > sample.len() * THRESHOLD_NUMERATOR
}

/// Read up to [`SAMPLE_SIZE`] bytes from `path` and classify them
pub fn is_binary_file(path: &Path) -> Result<bool> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let mut sample = Vec::with_capacity(SAMPLE_SIZE);
    file.take(SAMPLE_SIZE as u64)
        .read_to_end(&mut sample)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Ok(is_binary_sample(&sample))
}

/// Skips binary files unless binary inclusion is enabled
pub struct BinaryFilter {
    include_binary: bool,
}

impl BinaryFilter {
    pub fn new(include_binary: bool) -> Self {
        Self { include_binary }
    }

    pub fn allows_binary(&self) -> bool {
        self.include_binary
    }
}

impl Filter for BinaryFilter {
    type Input = Path;

    /// Errors are sampling failures; callers treat them as binary
    fn filter(&self, path: &Path) -> Result<FilterDecision> {
        if self.include_binary {
            return Ok(FilterDecision::Include);
        }

        if is_binary_file(path)? {
            Ok(FilterDecision::Exclude(SkipReason::Binary))
        } else {
            Ok(FilterDecision::Include)
        }
    }

    fn name(&self) -> &'static str {
        "BinaryFilter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_threshold_is_strict() {
        // 3 of 10 non-printable: exactly 30%, still text
        let mut sample = vec![b'a'; 7];
        sample.extend([0u8, 1, 2]);
        assert!(!is_binary_sample(&sample));

        // 4 of 10: binary
        sample[0] = 0xFF;
        assert!(is_binary_sample(&sample));
    }

    #[test]
    fn test_newlines_and_carriage_returns_are_printable() {
        assert!(!is_binary_sample(b"line one\r\nline two\n\n\n"));
        assert!(is_binary_sample(&[b'\t'; 4]), "tabs are outside the printable range");
    }

    #[test]
    fn test_empty_sample_is_text() {
        assert!(!is_binary_sample(&[]));
    }

    #[test]
    fn test_file_classification() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let text = temp_dir.path().join("notes.txt");
        let blob = temp_dir.path().join("blob.bin");
        let empty = temp_dir.path().join("empty");
        fs::write(&text, "plain text content\n")?;
        fs::write(&blob, [0u8, 159, 146, 150, 0, 0, 1, 2, 3, 4])?;
        fs::write(&empty, "")?;

        assert!(!is_binary_file(&text)?);
        assert!(is_binary_file(&blob)?);
        assert!(!is_binary_file(&empty)?);
        Ok(())
    }

    #[test]
    fn test_only_first_kilobyte_is_sampled() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let file = temp_dir.path().join("mixed.dat");
        let mut content = vec![b'a'; SAMPLE_SIZE];
        content.extend(vec![0u8; SAMPLE_SIZE * 4]);
        fs::write(&file, content)?;

        assert!(!is_binary_file(&file)?);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let filter = BinaryFilter::new(false);
        assert!(filter.filter(Path::new("/definitely/not/here.bin")).is_err());
    }

    #[test]
    fn test_filter_skips_sampling_when_binary_allowed() {
        let filter = BinaryFilter::new(true);
        assert_eq!(
            filter.filter(Path::new("/definitely/not/here.bin")).unwrap(),
            FilterDecision::Include
        );
    }
}

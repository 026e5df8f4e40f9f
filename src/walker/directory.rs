//! Directory discovery
//!
//! Enumerates the input tree with `ignore::WalkBuilder` (all of its gitignore-style
//! filtering switched off) and groups files under their parent directory. Inclusion is
//! decided later; the only pruning here is of entries *beneath* a hidden directory when
//! hidden paths are ignored, since their own last segment would not reveal it.

use super::types::{FileEntry, Warning, WarningCategory};
use ignore::WalkBuilder;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Every directory under the root (root is `""`) with its immediate files, sorted
#[derive(Debug, Default)]
pub struct DirectoryListing {
    pub directories: BTreeMap<String, Vec<FileEntry>>,
}

impl DirectoryListing {
    /// Directories below the root
    pub fn subdirectories(&self) -> impl Iterator<Item = &str> {
        self.directories.keys().map(String::as_str).filter(|d| !d.is_empty())
    }

    pub fn file_count(&self) -> usize {
        self.directories.values().map(Vec::len).sum()
    }
}

/// `/`-joined path of `path` relative to `root`
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// True when some component of `path` strictly between `root` and the final segment is hidden
fn under_hidden_directory(root: &Path, path: &Path) -> bool {
    let relative = relative_path(root, path);
    let mut segments: Vec<&str> = relative.split('/').collect();
    segments.pop();
    segments.iter().any(|s| s.starts_with('.'))
}

/// Size of the file at `path`, following symlinks. A failed lookup is a walk warning and
/// the file is left out, since neither its size limit nor its chunk share can be known.
fn file_size(path: &Path, warnings: &mut Vec<Warning>) -> Option<u64> {
    match fs::metadata(path) {
        Ok(metadata) => Some(metadata.len()),
        Err(e) => {
            let message = format!("Failed to read metadata for {}: {}", path.display(), e);
            tracing::warn!("{}", message);
            warnings.push(Warning {
                message,
                category: WarningCategory::Walk,
            });
            None
        }
    }
}

pub fn discover(root: &Path, ignore_hidden: bool, warnings: &mut Vec<Warning>) -> DirectoryListing {
    let mut listing = DirectoryListing::default();
    listing.directories.insert(String::new(), Vec::new());

    let prune_root: PathBuf = root.to_path_buf();
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            !(ignore_hidden && entry.depth() > 1 && under_hidden_directory(&prune_root, entry.path()))
        })
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Walk error: {}", e);
                warnings.push(Warning {
                    message: format!("Walk error: {}", e),
                    category: WarningCategory::Walk,
                });
                continue;
            }
        };

        if entry.depth() == 0 {
            continue;
        }
        let relative = relative_path(root, entry.path());

        if entry.file_type().is_some_and(|t| t.is_dir()) {
            listing.directories.entry(relative).or_default();
            continue;
        }

        // `is_file` follows symlinks; linked directories are not followed
        if !entry.path().is_file() {
            let message = format!("Skipping {} (not a regular file)", entry.path().display());
            tracing::warn!("{}", message);
            warnings.push(Warning {
                message,
                category: WarningCategory::Walk,
            });
            continue;
        }

        let Some(size) = file_size(entry.path(), warnings) else {
            continue;
        };
        let parent = relative
            .rsplit_once('/')
            .map(|(dir, _)| dir.to_string())
            .unwrap_or_default();
        listing.directories.entry(parent).or_default().push(FileEntry {
            path: entry.path().to_path_buf(),
            relative,
            size,
        });
    }

    for files in listing.directories.values_mut() {
        files.sort_by(|a, b| a.relative.cmp(&b.relative));
    }

    tracing::debug!(
        "Discovered {} directories and {} files under {}",
        listing.directories.len(),
        listing.file_count(),
        root.display()
    );
    listing
}

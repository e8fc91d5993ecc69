//! Directory scanner built on walkdir with pre-descent pruning.
//!
//! # Overview
//!
//! [`Scanner`] walks a root directory recursively, applies the
//! [`PathFilter`] to each directory *before* descending into it, and
//! produces one [`FileRecord`] per readable regular file. Entries that are
//! not regular files are counted as skipped; files that fail stat or
//! hashing are logged and dropped individually without aborting the scan.
//!
//! Traversal order is deterministic (lexicographic within each directory)
//! so that downstream resolution outcomes are reproducible.
//!
//! # Example
//!
//! ```no_run
//! use clearfile::scanner::{PathFilter, Scanner};
//! use std::path::Path;
//!
//! let scanner = Scanner::new(PathFilter::with_defaults());
//! let outcome = scanner.scan(Path::new("/home/user/notes"));
//! println!("{} files, {} failures", outcome.records.len(), outcome.stats.failed);
//! ```

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{fingerprint, FileRecord, PathFilter, ScanError};

/// Counters and failures accumulated during one scan.
#[derive(Debug, Default)]
pub struct ScanStats {
    /// Regular files successfully fingerprinted
    pub scanned: usize,
    /// Entries skipped because they are not regular files
    pub skipped_non_file: usize,
    /// Files dropped because stat or hashing failed
    pub failed: usize,
    /// Directories pruned by the path filter
    pub pruned_dirs: usize,
    /// True if the root did not resolve to an existing directory
    pub invalid_root: bool,
    /// The individual per-file failures
    pub errors: Vec<ScanError>,
}

/// Result of one scan: the flat record list plus statistics.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// One record per readable regular file under the root
    pub records: Vec<FileRecord>,
    /// Scan counters and accumulated failures
    pub stats: ScanStats,
}

/// Recursive directory scanner.
#[derive(Debug, Clone)]
pub struct Scanner {
    filter: PathFilter,
}

impl Scanner {
    /// Create a scanner with the given exclusion filter.
    #[must_use]
    pub fn new(filter: PathFilter) -> Self {
        Self { filter }
    }

    /// Create a scanner with the built-in exclusion tables.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(PathFilter::with_defaults())
    }

    /// Scan `root` recursively and collect a record per regular file.
    ///
    /// The root is resolved to an absolute path first. A root that is not
    /// an existing directory is reported (logged as an error, flagged in
    /// the stats) and yields an empty outcome; callers proceed with
    /// "no files found" semantics rather than aborting.
    #[must_use]
    pub fn scan(&self, root: &Path) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();

        let root = match Self::resolve_root(root) {
            Ok(path) => path,
            Err(err) => {
                log::error!("{err}");
                outcome.stats.invalid_root = true;
                return outcome;
            }
        };

        log::info!("Scanning {}", root.display());

        let filter = self.filter.clone();
        let pruned = std::cell::Cell::new(0usize);
        let walk = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if !entry.file_type().is_dir() {
                    return true;
                }
                if filter.should_descend(entry.path()) {
                    true
                } else {
                    log::info!("Pruning excluded directory: {}", entry.path().display());
                    pruned.set(pruned.get() + 1);
                    false
                }
            });

        for entry in walk {
            match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    match fingerprint::metadata(entry.path()) {
                        Ok(record) => {
                            log::debug!(
                                "Scanned {} ({})",
                                record.path.display(),
                                record.short_hash()
                            );
                            outcome.stats.scanned += 1;
                            outcome.records.push(record);
                        }
                        Err(err) => {
                            log::warn!("Failed to read file: {err}");
                            outcome.stats.failed += 1;
                            outcome.stats.errors.push(err);
                        }
                    }
                }
                Ok(entry) if entry.file_type().is_dir() => {}
                Ok(entry) => {
                    // Sockets, devices, symlinks we do not follow
                    log::warn!("Skipped (not a regular file): {}", entry.path().display());
                    outcome.stats.skipped_non_file += 1;
                }
                Err(err) => {
                    let path = err
                        .path()
                        .map_or_else(|| root.clone(), Path::to_path_buf);
                    log::warn!("Walk error for {}: {err}", path.display());
                    outcome.stats.failed += 1;
                    outcome.stats.errors.push(ScanError::Io {
                        path,
                        source: std::io::Error::other(err.to_string()),
                    });
                }
            }
        }

        outcome.stats.pruned_dirs = pruned.get();
        log::info!(
            "Scan complete: {} files, {} skipped, {} failed, {} directories pruned",
            outcome.stats.scanned,
            outcome.stats.skipped_non_file,
            outcome.stats.failed,
            outcome.stats.pruned_dirs
        );

        outcome
    }

    /// Resolve the root to an absolute path, requiring an existing directory.
    fn resolve_root(root: &Path) -> Result<PathBuf, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }
        std::fs::canonicalize(root).map_err(|e| ScanError::from_io(root, e))
    }
}

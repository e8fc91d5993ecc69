//! Scanner module for directory traversal and file fingerprinting.
//!
//! This module provides functionality for:
//! - Recursive directory walking with excluded-subtree pruning
//! - Whole-file SHA-256 content fingerprinting
//! - Per-file metadata collection into [`FileRecord`]s
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`filter`]: Excluded-directory and system-path predicates
//! - [`fingerprint`]: Streaming SHA-256 hashing and metadata collection
//! - [`walker`]: Directory traversal and file discovery
//!
//! # Example
//!
//! ```no_run
//! use clearfile::scanner::{PathFilter, Scanner};
//! use std::path::Path;
//!
//! let scanner = Scanner::new(PathFilter::with_defaults());
//! let outcome = scanner.scan(Path::new("/home/user/notes"));
//! for record in &outcome.records {
//!     println!("{}: {}", record.path.display(), record.hash);
//! }
//! ```

pub mod filter;
pub mod fingerprint;
pub mod walker;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use filter::PathFilter;
pub use walker::{ScanOutcome, ScanStats, Scanner};

/// Metadata for one scanned file.
///
/// A record uniquely identifies a file within a single scan by its absolute
/// path. Records are immutable once created; a re-scan produces new records
/// rather than mutating old ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Base file name (not unique across the tree)
    pub name: String,
    /// Absolute path to the file (unique within one scan)
    pub path: PathBuf,
    /// Lowercase hex SHA-256 digest of the full file content
    pub hash: String,
    /// Creation time as reported by the filesystem.
    /// Falls back to the modification time where no birth time exists.
    pub created: DateTime<Utc>,
    /// Last modification time
    pub modified: DateTime<Utc>,
}

impl FileRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(
        name: String,
        path: PathBuf,
        hash: String,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    ) -> Self {
        Self {
            name,
            path,
            hash,
            created,
            modified,
        }
    }

    /// Short (10 character) hash prefix for log lines.
    #[must_use]
    pub fn short_hash(&self) -> &str {
        let end = self.hash.len().min(10);
        &self.hash[..end]
    }
}

/// Errors that can occur during scanning or fingerprinting.
///
/// Every variant is recoverable: the affected file or root is reported and
/// excluded, and the rest of the scan continues.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The scan root does not resolve to an existing directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The path disappeared between listing and reading.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while reading a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Map an I/O error for a path to the matching variant.
    pub(crate) fn from_io(path: &std::path::Path, error: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match error.kind() {
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

//! Streaming SHA-256 file fingerprinting and metadata collection.
//!
//! # Overview
//!
//! [`fingerprint`] reads a file in fixed-size chunks through SHA-256 and
//! returns the lowercase hex digest. The hash always covers the whole file;
//! duplicate detection depends on exact content equality, so no sampled or
//! partial hashing is acceptable here.
//!
//! [`metadata`] combines the fingerprint with stat information into a
//! [`FileRecord`]. Any I/O failure (permission denied, file removed between
//! listing and reading, unreadable device) maps to a recoverable
//! [`ScanError`] so the caller can log it and continue over other files.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use super::{FileRecord, ScanError};

/// Read chunk size for streaming hashing.
pub const CHUNK_SIZE: usize = 8192;

/// Compute the SHA-256 digest of a file's full content.
///
/// The file is streamed in [`CHUNK_SIZE`] blocks, never loaded whole into
/// memory.
///
/// # Errors
///
/// Returns a [`ScanError`] if the file cannot be opened or read.
pub fn fingerprint(path: &Path) -> Result<String, ScanError> {
    let mut file = File::open(path).map_err(|e| ScanError::from_io(path, e))?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let read = file
            .read(&mut buffer)
            .map_err(|e| ScanError::from_io(path, e))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(digest_to_hex(&hasher.finalize()))
}

/// Convert a raw digest to a lowercase hex string.
#[must_use]
pub fn digest_to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;
    bytes.iter().fold(
        String::with_capacity(bytes.len() * 2),
        |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        },
    )
}

/// Collect name, path, content hash and timestamps for one file.
///
/// The creation time falls back to the modification time on filesystems
/// that report no birth time.
///
/// # Errors
///
/// Returns a [`ScanError`] on any stat or read failure; the caller is
/// expected to log it and drop this file from the result set.
pub fn metadata(path: &Path) -> Result<FileRecord, ScanError> {
    let meta = std::fs::metadata(path).map_err(|e| ScanError::from_io(path, e))?;

    let modified: DateTime<Utc> = meta
        .modified()
        .map_err(|e| ScanError::from_io(path, e))?
        .into();
    let created: DateTime<Utc> = meta.created().map_or(modified, Into::into);

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(FileRecord {
        name,
        path: path.to_path_buf(),
        hash: fingerprint(path)?,
        created,
        modified,
    })
}

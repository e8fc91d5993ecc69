//! Resolution engine: duplicate deletion and version reconciliation.
//!
//! # Overview
//!
//! For every name group with two or more records the engine:
//!
//! 1. Deletes the redundant copies inside each byte-identical version
//!    group, keeping the first listed record.
//! 2. Reconciles the remaining distinct versions pairwise: the older
//!    created file becomes the merge base, the newer file's text is
//!    appended behind a marker and the newer file is deleted. Equal
//!    creation times are a genuine conflict resolved by a random choice,
//!    injected via [`TieBreaker`] so tests can pin the outcome.
//!
//! All failures are reported and local: a failed delete or merge abandons
//! that record or pairing, the remaining groups still run.
//!
//! Merge I/O is text-mode UTF-8. Merging binary content by concatenation
//! would corrupt it; binary files are out of scope for the merge path.

pub mod engine;
pub mod merge;
pub mod tiebreak;

use std::path::PathBuf;

pub use engine::{ResolveStats, Resolver};
pub use merge::{CONFLICT_MARKER, VERSION_MARKER};
pub use tiebreak::{RandomTieBreaker, TieBreaker};

/// Errors that can occur while resolving a name group.
///
/// Every variant is recoverable; the affected pairing or record is
/// abandoned and resolution continues with the rest.
#[derive(thiserror::Error, Debug)]
pub enum ResolveError {
    /// Deleting a redundant or merged-away file failed.
    #[error("Failed to delete {path}: {source}")]
    DeleteFailed {
        /// The file that could not be deleted
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Reading the incoming file or appending to the base failed.
    #[error("Failed to merge {incoming} into {base}: {source}")]
    MergeIo {
        /// The surviving merge base
        base: PathBuf,
        /// The file whose content was being appended
        incoming: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

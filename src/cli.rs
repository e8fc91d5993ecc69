//! Command-line interface definitions for clearfile.
//!
//! # Example
//!
//! ```bash
//! # Resolve duplicates and versions under a directory
//! clearfile ~/notes
//!
//! # Verbose mode for debugging
//! clearfile -v ~/notes
//!
//! # Pin the random conflict tie-break for a reproducible run
//! clearfile --seed 42 ~/notes
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Same-name duplicate cleaner and version reconciler.
///
/// clearfile scans a directory tree, deletes byte-identical copies of
/// same-named files, and merges diverging versions into a single file
/// (older version as the base, newer content appended behind a marker).
#[derive(Debug, Parser)]
#[command(name = "clearfile")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory tree to scan and resolve
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Emit errors as structured JSON on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Seed for the random conflict tie-break (reproducible runs)
    ///
    /// Files with equal creation times and differing content are merged
    /// into a randomly chosen survivor; a fixed seed pins that choice.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

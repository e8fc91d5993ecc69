//! Marker-delimited text merges between same-named files.
//!
//! A merge appends the incoming file's full text to the end of the base
//! file, preceded by a blank line, a marker line and a line naming the
//! source path, then deletes the incoming file. The base file's path
//! survives; its content grows.
//!
//! There is no rollback: if the append succeeds but the delete fails, the
//! content exists in both files. That state is logged, not masked.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use super::ResolveError;

/// Marker line written before content merged by creation-time order.
pub const VERSION_MARKER: &str = "# --- merged version ---";

/// Marker line written before content merged by random conflict choice.
pub const CONFLICT_MARKER: &str = "# --- merged random conflict ---";

/// Append `incoming`'s text to `base` behind `marker`, then delete `incoming`.
///
/// # Errors
///
/// [`ResolveError::MergeIo`] if reading or appending fails (the incoming
/// file is left in place); [`ResolveError::DeleteFailed`] if the append
/// succeeded but the source could not be removed, leaving the content
/// duplicated across both files.
pub fn append_and_delete(base: &Path, incoming: &Path, marker: &str) -> Result<(), ResolveError> {
    let merge_io = |source| ResolveError::MergeIo {
        base: base.to_path_buf(),
        incoming: incoming.to_path_buf(),
        source,
    };

    let content = fs::read_to_string(incoming).map_err(merge_io)?;

    let mut file = OpenOptions::new()
        .append(true)
        .open(base)
        .map_err(merge_io)?;
    write!(
        file,
        "\n\n{marker}\n# merged from: {}\n{content}",
        incoming.display()
    )
    .map_err(merge_io)?;

    fs::remove_file(incoming).map_err(|source| ResolveError::DeleteFailed {
        path: incoming.to_path_buf(),
        source,
    })?;

    log::info!("Merged {} -> {}", incoming.display(), base.display());
    Ok(())
}

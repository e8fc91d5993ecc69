//! Grouping and classification of scanned files.
//!
//! # Overview
//!
//! Records are partitioned first by base file name, then within each name
//! group by content hash. A name group whose records all share one hash is
//! classified as *identical* (pure duplicates); more than one hash means
//! divergent *versions* that need reconciliation.
//!
//! Grouping is pure apart from the classification log lines it emits.
//!
//! # Example
//!
//! ```
//! use clearfile::groups::group_by_name;
//!
//! let groups = group_by_name(Vec::new());
//! assert!(groups.is_empty());
//! ```

use std::collections::BTreeMap;

use crate::scanner::FileRecord;

/// All records sharing one content hash within a name group.
///
/// Hash groups preserve the order in which records were first seen; the
/// resolution engine's retention choice and merge pop order depend on it.
#[derive(Debug, Clone)]
pub struct VersionGroup {
    /// Shared content hash (lowercase hex)
    pub hash: String,
    /// Records with this exact content
    pub records: Vec<FileRecord>,
}

impl VersionGroup {
    /// Number of records in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True if the group holds byte-identical redundant copies.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.records.len() > 1
    }
}

/// Classification of a name group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// All same-named files are byte-identical.
    Identical,
    /// Same-named files diverge in content.
    Versioned,
}

/// Partition records by base file name.
///
/// Returns a `BTreeMap` so iteration over names is deterministic. The
/// order of records within each name group follows the input order.
#[must_use]
pub fn group_by_name(records: Vec<FileRecord>) -> BTreeMap<String, Vec<FileRecord>> {
    let mut groups: BTreeMap<String, Vec<FileRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.name.clone()).or_default().push(record);
    }
    groups
}

/// Partition records by content hash, preserving first-seen hash order.
#[must_use]
pub fn group_by_hash(records: &[FileRecord]) -> Vec<VersionGroup> {
    let mut groups: Vec<VersionGroup> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|g| g.hash == record.hash) {
            Some(group) => group.records.push(record.clone()),
            None => groups.push(VersionGroup {
                hash: record.hash.clone(),
                records: vec![record.clone()],
            }),
        }
    }
    groups
}

/// Classify a name group and log what was found.
///
/// One version group means every same-named file is identical; more than
/// one means divergent versions, logged one line per record with a short
/// hash, the modification time and the path.
#[must_use]
pub fn classify(name: &str, versions: &[VersionGroup]) -> Classification {
    if versions.len() == 1 {
        log::info!("File '{name}' has identical content in all locations");
        Classification::Identical
    } else {
        log::info!("File '{name}' has {} diverging versions:", versions.len());
        for group in versions {
            for record in &group.records {
                log::info!(
                    "  version '{name}' | hash: {} | {} | {}",
                    record.short_hash(),
                    record.modified.format("%Y-%m-%d %H:%M:%S"),
                    record.path.display()
                );
            }
        }
        Classification::Versioned
    }
}

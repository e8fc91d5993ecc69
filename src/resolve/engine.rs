//! Per-name resolution: duplicate elimination then pairwise reconciliation.

use std::collections::BTreeMap;

use crate::groups::{classify, group_by_hash, VersionGroup};
use crate::scanner::FileRecord;

use super::merge::{append_and_delete, CONFLICT_MARKER, VERSION_MARKER};
use super::tiebreak::TieBreaker;
use super::ResolveError;

/// Counters and failures accumulated while resolving one tree.
#[derive(Debug, Default)]
pub struct ResolveStats {
    /// Name groups with two or more records that were processed
    pub groups_resolved: usize,
    /// Redundant byte-identical copies deleted
    pub duplicates_deleted: usize,
    /// Version merges ordered by creation time
    pub version_merges: usize,
    /// Merges decided by the random tie break
    pub conflict_merges: usize,
    /// The individual failures (pairing or record abandoned, run continued)
    pub failures: Vec<ResolveError>,
}

impl ResolveStats {
    /// Total filesystem mutations applied.
    #[must_use]
    pub fn actions(&self) -> usize {
        self.duplicates_deleted + self.version_merges + self.conflict_merges
    }

    /// True if every attempted action succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Resolution engine for name groups.
///
/// Owns the injected [`TieBreaker`] used for equal-creation-time conflicts.
///
/// # Example
///
/// ```no_run
/// use clearfile::groups::group_by_name;
/// use clearfile::resolve::{RandomTieBreaker, Resolver};
/// use clearfile::scanner::{PathFilter, Scanner};
/// use std::path::Path;
///
/// let outcome = Scanner::new(PathFilter::with_defaults()).scan(Path::new("."));
/// let groups = group_by_name(outcome.records);
/// let mut resolver = Resolver::new(RandomTieBreaker::new());
/// let stats = resolver.resolve(groups);
/// println!("{} actions, {} failures", stats.actions(), stats.failures.len());
/// ```
#[derive(Debug)]
pub struct Resolver<T: TieBreaker> {
    tie_breaker: T,
}

impl<T: TieBreaker> Resolver<T> {
    /// Create a resolver with the given tie breaker.
    #[must_use]
    pub fn new(tie_breaker: T) -> Self {
        Self { tie_breaker }
    }

    /// Resolve every name group with two or more records.
    ///
    /// Single-record names need no action and are skipped. Failures never
    /// abort the run; they are logged, collected into the stats, and the
    /// remaining groups are still processed.
    pub fn resolve(&mut self, groups: BTreeMap<String, Vec<FileRecord>>) -> ResolveStats {
        let mut stats = ResolveStats::default();

        for (name, records) in groups {
            if records.len() < 2 {
                continue;
            }
            stats.groups_resolved += 1;
            self.resolve_group(&name, &records, &mut stats);
        }

        log::info!(
            "Resolution complete: {} duplicates deleted, {} version merges, {} conflict merges, {} failures",
            stats.duplicates_deleted,
            stats.version_merges,
            stats.conflict_merges,
            stats.failures.len()
        );
        stats
    }

    /// Resolve one name group: delete redundant copies, then merge the
    /// remaining distinct versions pairwise.
    fn resolve_group(&mut self, name: &str, records: &[FileRecord], stats: &mut ResolveStats) {
        let versions = group_by_hash(records);
        let _ = classify(name, &versions);

        // Step 1: within each identical-content group keep the first
        // record, delete the rest. Only groups that already had exactly
        // one member move on to reconciliation in this pass.
        let mut survivors: Vec<FileRecord> = Vec::new();
        for group in versions {
            if group.has_duplicates() {
                self.delete_duplicates(&group, stats);
            } else {
                survivors.extend(group.records);
            }
        }

        // Step 2: pairwise pop-and-merge, most recently collected first.
        // An odd count leaves exactly one record untouched.
        while survivors.len() >= 2 {
            let (Some(first), Some(second)) = (survivors.pop(), survivors.pop()) else {
                break;
            };

            let result = if first.created == second.created {
                self.merge_conflict(&first, &second, stats)
            } else {
                Self::merge_by_creation(&first, &second, stats)
            };

            if let Err(err) = result {
                log::error!("{err}");
                stats.failures.push(err);
            }
        }
    }

    /// Delete every record of a byte-identical group except the first.
    fn delete_duplicates(&self, group: &VersionGroup, stats: &mut ResolveStats) {
        for record in &group.records[1..] {
            match std::fs::remove_file(&record.path) {
                Ok(()) => {
                    log::info!("Deleted duplicate: {}", record.path.display());
                    stats.duplicates_deleted += 1;
                }
                Err(source) => {
                    let err = ResolveError::DeleteFailed {
                        path: record.path.clone(),
                        source,
                    };
                    log::error!("{err}");
                    stats.failures.push(err);
                }
            }
        }
    }

    /// Merge two versions with differing creation times: the older file is
    /// the base, the newer content is appended to it.
    fn merge_by_creation(
        first: &FileRecord,
        second: &FileRecord,
        stats: &mut ResolveStats,
    ) -> Result<(), ResolveError> {
        let (base, incoming) = if first.created <= second.created {
            (first, second)
        } else {
            (second, first)
        };

        append_and_delete(&base.path, &incoming.path, VERSION_MARKER)?;
        stats.version_merges += 1;
        Ok(())
    }

    /// Merge a true conflict (equal creation instants, differing content)
    /// by keeping a randomly chosen survivor.
    fn merge_conflict(
        &mut self,
        first: &FileRecord,
        second: &FileRecord,
        stats: &mut ResolveStats,
    ) -> Result<(), ResolveError> {
        let (chosen, discarded) = if self.tie_breaker.keep_first() {
            (first, second)
        } else {
            (second, first)
        };

        log::info!(
            "Random conflict for '{}': keeping {}",
            chosen.name,
            chosen.path.display()
        );
        append_and_delete(&chosen.path, &discarded.path, CONFLICT_MARKER)?;
        stats.conflict_merges += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::group_by_name;
    use crate::resolve::RandomTieBreaker;
    use chrono::{TimeZone, Utc};
    use sha2::Digest;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Tie breaker with a predetermined answer.
    struct FixedTieBreaker(bool);

    impl TieBreaker for FixedTieBreaker {
        fn keep_first(&mut self) -> bool {
            self.0
        }
    }

    fn write_file(dir: &Path, rel: &str, content: &str) -> PathBuf {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut f = File::create(&path).unwrap();
        write!(f, "{content}").unwrap();
        path
    }

    /// Build a record pointing at a real file, with a chosen creation time.
    fn record_at(path: &Path, content: &str, created_secs: i64) -> FileRecord {
        let hash = crate::scanner::fingerprint::digest_to_hex(&sha2::Sha256::digest(content));
        let created = Utc.timestamp_opt(created_secs, 0).unwrap();
        FileRecord::new(
            path.file_name().unwrap().to_string_lossy().into_owned(),
            path.to_path_buf(),
            hash,
            created,
            created,
        )
    }

    #[test]
    fn test_duplicates_keep_first_listed() {
        let dir = TempDir::new().unwrap();
        let a = write_file(dir.path(), "a/x.txt", "hi");
        let b = write_file(dir.path(), "b/x.txt", "hi");

        let records = vec![record_at(&a, "hi", 1000), record_at(&b, "hi", 2000)];
        let mut resolver = Resolver::new(RandomTieBreaker::seeded(0));
        let stats = resolver.resolve(group_by_name(records));

        assert_eq!(stats.duplicates_deleted, 1);
        assert_eq!(stats.version_merges, 0);
        assert!(a.exists(), "first listed copy survives");
        assert!(!b.exists());
        assert_eq!(fs::read_to_string(&a).unwrap(), "hi");
    }

    #[test]
    fn test_version_merge_older_is_base() {
        let dir = TempDir::new().unwrap();
        let old = write_file(dir.path(), "a/x.txt", "old");
        let new = write_file(dir.path(), "b/x.txt", "new");

        let records = vec![record_at(&old, "old", 1000), record_at(&new, "new", 2000)];
        let mut resolver = Resolver::new(RandomTieBreaker::seeded(0));
        let stats = resolver.resolve(group_by_name(records));

        assert_eq!(stats.version_merges, 1);
        assert!(old.exists());
        assert!(!new.exists());

        let merged = fs::read_to_string(&old).unwrap();
        assert!(merged.starts_with("old"));
        assert!(merged.contains(VERSION_MARKER));
        assert!(merged.ends_with("new"));
    }

    #[test]
    fn test_conflict_fixed_keep_first() {
        let dir = TempDir::new().unwrap();
        let a = write_file(dir.path(), "a/x.txt", "alpha");
        let b = write_file(dir.path(), "b/x.txt", "beta");

        // Same creation instant, differing content. Survivors pop LIFO,
        // so "first" in the conflict pair is the later-listed record.
        let records = vec![record_at(&a, "alpha", 1000), record_at(&b, "beta", 1000)];
        let mut resolver = Resolver::new(FixedTieBreaker(true));
        let stats = resolver.resolve(group_by_name(records));

        assert_eq!(stats.conflict_merges, 1);
        // Exactly one of the two paths exists, holding both contents.
        assert_ne!(a.exists(), b.exists());
        let survivor = if a.exists() { &a } else { &b };
        let merged = fs::read_to_string(survivor).unwrap();
        assert!(merged.contains(CONFLICT_MARKER));
        assert!(merged.contains("alpha"));
        assert!(merged.contains("beta"));
    }

    #[test]
    fn test_conflict_fixed_outcomes_are_opposite() {
        for keep_first in [true, false] {
            let dir = TempDir::new().unwrap();
            let a = write_file(dir.path(), "a/x.txt", "alpha");
            let b = write_file(dir.path(), "b/x.txt", "beta");

            let records = vec![record_at(&a, "alpha", 1000), record_at(&b, "beta", 1000)];
            let mut resolver = Resolver::new(FixedTieBreaker(keep_first));
            resolver.resolve(group_by_name(records));

            // LIFO pop order makes b the first of the pair
            if keep_first {
                assert!(b.exists());
                assert!(!a.exists());
            } else {
                assert!(a.exists());
                assert!(!b.exists());
            }
        }
    }

    #[test]
    fn test_odd_survivor_count_leaves_one_untouched() {
        let dir = TempDir::new().unwrap();
        let a = write_file(dir.path(), "a/x.txt", "v1");
        let b = write_file(dir.path(), "b/x.txt", "v2");
        let c = write_file(dir.path(), "c/x.txt", "v3");

        let records = vec![
            record_at(&a, "v1", 1000),
            record_at(&b, "v2", 2000),
            record_at(&c, "v3", 3000),
        ];
        let mut resolver = Resolver::new(RandomTieBreaker::seeded(0));
        let stats = resolver.resolve(group_by_name(records));

        // One pair merges (c pops with b), one record is left untouched (a)
        assert_eq!(stats.version_merges, 1);
        assert!(a.exists());
        assert_eq!(fs::read_to_string(&a).unwrap(), "v1");
        assert!(b.exists());
        assert!(!c.exists());
    }

    #[test]
    fn test_kept_duplicate_representative_not_remerged() {
        let dir = TempDir::new().unwrap();
        // Version A has two identical copies, version B has one.
        let a1 = write_file(dir.path(), "a/x.txt", "vA");
        let a2 = write_file(dir.path(), "b/x.txt", "vA");
        let b1 = write_file(dir.path(), "c/x.txt", "vB");

        let records = vec![
            record_at(&a1, "vA", 1000),
            record_at(&a2, "vA", 1000),
            record_at(&b1, "vB", 2000),
        ];
        let mut resolver = Resolver::new(RandomTieBreaker::seeded(0));
        let stats = resolver.resolve(group_by_name(records));

        // The copy is deleted; the kept representative of the multi-copy
        // group does not enter this pass's merge loop.
        assert_eq!(stats.duplicates_deleted, 1);
        assert_eq!(stats.version_merges, 0);
        assert!(a1.exists());
        assert!(!a2.exists());
        assert!(b1.exists());
    }

    #[test]
    fn test_single_record_names_untouched() {
        let dir = TempDir::new().unwrap();
        let only = write_file(dir.path(), "only.txt", "alone");

        let records = vec![record_at(&only, "alone", 1000)];
        let mut resolver = Resolver::new(RandomTieBreaker::seeded(0));
        let stats = resolver.resolve(group_by_name(records));

        assert_eq!(stats.groups_resolved, 0);
        assert_eq!(stats.actions(), 0);
        assert!(only.exists());
    }

    #[test]
    fn test_delete_failure_does_not_abort_other_groups() {
        let dir = TempDir::new().unwrap();
        // x.txt duplicates where one copy is already gone
        let x1 = write_file(dir.path(), "a/x.txt", "same");
        let ghost = dir.path().join("b").join("x.txt");
        fs::create_dir_all(ghost.parent().unwrap()).unwrap();
        // y.txt duplicates that are both present
        let y1 = write_file(dir.path(), "a/y.txt", "dup");
        let y2 = write_file(dir.path(), "b/y.txt", "dup");

        let records = vec![
            record_at(&x1, "same", 1000),
            record_at(&ghost, "same", 1000),
            record_at(&y1, "dup", 1000),
            record_at(&y2, "dup", 1000),
        ];
        let mut resolver = Resolver::new(RandomTieBreaker::seeded(0));
        let stats = resolver.resolve(group_by_name(records));

        assert_eq!(stats.failures.len(), 1);
        assert!(matches!(
            stats.failures[0],
            ResolveError::DeleteFailed { .. }
        ));
        // The y group was still processed
        assert!(y1.exists());
        assert!(!y2.exists());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let old = write_file(dir.path(), "a/x.txt", "old");
        let new = write_file(dir.path(), "b/x.txt", "new");

        let records = vec![record_at(&old, "old", 1000), record_at(&new, "new", 2000)];
        let mut resolver = Resolver::new(RandomTieBreaker::seeded(0));
        resolver.resolve(group_by_name(records));

        // Re-scan the resolved tree: one file per name remains, so a
        // second resolution pass performs no deletions or merges.
        let outcome = crate::scanner::Scanner::with_defaults().scan(dir.path());
        let merged_content = fs::read_to_string(&old).unwrap();

        let stats = resolver.resolve(group_by_name(outcome.records));
        assert_eq!(stats.actions(), 0);
        assert_eq!(fs::read_to_string(&old).unwrap(), merged_content);
    }
}

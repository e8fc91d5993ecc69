//! Path exclusion predicates for directory pruning.
//!
//! # Overview
//!
//! Two predicates decide whether the walker descends into a directory:
//!
//! - [`PathFilter::is_excluded_dir`]: any path component matches a fixed
//!   denylist of directory names (version-control metadata, dependency and
//!   cache directories, virtual environments, IDE metadata).
//! - [`PathFilter::is_system_path`]: the absolute path starts with one of a
//!   set of OS-specific system-root prefixes.
//!
//! Both predicates are pure and cheap; they are evaluated once per visited
//! directory, before descent, so excluded subtrees are never listed or
//! fingerprinted.
//!
//! The tables are immutable data injected at construction. Unknown platforms
//! get an empty prefix list, i.e. no system-path exclusion.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Directory names that are never descended into.
const EXCLUDED_DIR_NAMES: &[&str] = &[
    "__pycache__",
    "__cache__",
    ".git",
    ".vscode",
    ".idea",
    ".ruff_cache",
    ".pytest_cache",
    ".mypy_cache",
    ".cache",
    "htmlcov",
    "venv",
    "env",
    "node_modules",
    "target",
];

/// System-root prefixes that are never traversed, per platform identifier.
fn system_prefixes_for(os: &str) -> Vec<PathBuf> {
    let prefixes: &[&str] = match os {
        "windows" => &["C:\\Windows", "C:\\Program Files", "C:\\ProgramData"],
        "linux" => &["/proc", "/dev", "/sys", "/run", "/boot"],
        "macos" => &["/System", "/private", "/Volumes"],
        "android" => &["/proc", "/dev", "/system", "/vendor"],
        _ => &[],
    };
    prefixes.iter().map(PathBuf::from).collect()
}

/// Immutable exclusion configuration for the directory walker.
#[derive(Debug, Clone)]
pub struct PathFilter {
    excluded_names: BTreeSet<String>,
    system_prefixes: Vec<PathBuf>,
}

impl PathFilter {
    /// Create a filter from explicit exclusion tables.
    ///
    /// # Arguments
    ///
    /// * `excluded_names` - Directory names to prune anywhere in the tree
    /// * `system_prefixes` - Absolute path prefixes to prune
    #[must_use]
    pub fn new(
        excluded_names: impl IntoIterator<Item = String>,
        system_prefixes: Vec<PathBuf>,
    ) -> Self {
        Self {
            excluded_names: excluded_names.into_iter().collect(),
            system_prefixes,
        }
    }

    /// Create a filter with the built-in denylist and the system prefixes
    /// for the running platform (`std::env::consts::OS`).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(
            EXCLUDED_DIR_NAMES.iter().map(|s| (*s).to_string()),
            system_prefixes_for(std::env::consts::OS),
        )
    }

    /// True if any component of `path` matches the excluded-name set.
    #[must_use]
    pub fn is_excluded_dir(&self, path: &Path) -> bool {
        path.components().any(|component| {
            component
                .as_os_str()
                .to_str()
                .is_some_and(|name| self.excluded_names.contains(name))
        })
    }

    /// True if `path` starts with one of the system-root prefixes.
    #[must_use]
    pub fn is_system_path(&self, path: &Path) -> bool {
        self.system_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix))
    }

    /// True if the walker may descend into `path`.
    #[must_use]
    pub fn should_descend(&self, path: &Path) -> bool {
        !self.is_excluded_dir(path) && !self.is_system_path(path)
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluded_dir_by_component() {
        let filter = PathFilter::with_defaults();

        assert!(filter.is_excluded_dir(Path::new("/home/user/project/.git")));
        assert!(filter.is_excluded_dir(Path::new("/home/user/project/.git/objects")));
        assert!(filter.is_excluded_dir(Path::new("/data/__cache__/sub")));
        assert!(filter.is_excluded_dir(Path::new("/data/node_modules")));
        assert!(!filter.is_excluded_dir(Path::new("/home/user/project/src")));
    }

    #[test]
    fn test_excluded_dir_matches_whole_component_only() {
        let filter = PathFilter::with_defaults();

        // "environment" contains "env" as a substring but not as a component
        assert!(!filter.is_excluded_dir(Path::new("/home/user/environment")));
        assert!(filter.is_excluded_dir(Path::new("/home/user/env")));
    }

    #[test]
    fn test_system_path_prefixes() {
        let filter = PathFilter::new(
            std::iter::empty(),
            vec![PathBuf::from("/proc"), PathBuf::from("/sys")],
        );

        assert!(filter.is_system_path(Path::new("/proc")));
        assert!(filter.is_system_path(Path::new("/proc/1/status")));
        assert!(!filter.is_system_path(Path::new("/process/data")));
        assert!(!filter.is_system_path(Path::new("/home/user")));
    }

    #[test]
    fn test_unknown_platform_has_no_system_prefixes() {
        let prefixes = system_prefixes_for("plan9");
        assert!(prefixes.is_empty());
    }

    #[test]
    fn test_known_platforms_have_prefixes() {
        assert!(!system_prefixes_for("linux").is_empty());
        assert!(!system_prefixes_for("windows").is_empty());
        assert!(!system_prefixes_for("macos").is_empty());
        assert!(!system_prefixes_for("android").is_empty());
    }

    #[test]
    fn test_should_descend_combines_both_predicates() {
        let filter = PathFilter::new(
            ["skipme".to_string()],
            vec![PathBuf::from("/forbidden")],
        );

        assert!(filter.should_descend(Path::new("/home/user/data")));
        assert!(!filter.should_descend(Path::new("/home/user/skipme")));
        assert!(!filter.should_descend(Path::new("/forbidden/data")));
    }

    #[test]
    fn test_filter_is_pure() {
        let filter = PathFilter::with_defaults();
        let path = Path::new("/home/user/.git/config");

        // Repeated calls agree
        assert_eq!(filter.is_excluded_dir(path), filter.is_excluded_dir(path));
    }
}

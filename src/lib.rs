//! clearfile - same-name duplicate cleaner and version reconciler.
//!
//! Scans a directory tree for files sharing a base name, deletes
//! byte-identical redundant copies, and reconciles same-named files with
//! divergent content into a single file via a concatenation-based merge
//! policy (older file is the base; equal creation times are resolved by a
//! random choice).

pub mod cli;
pub mod error;
pub mod groups;
pub mod logging;
pub mod resolve;
pub mod scanner;

use anyhow::Result;

use cli::Cli;
use error::ExitCode;
use groups::group_by_name;
use resolve::{RandomTieBreaker, Resolver};
use scanner::{PathFilter, Scanner};

/// Run the scan-then-resolve pipeline once.
///
/// Returns the process exit code: success when actions were applied and
/// all succeeded, a distinct code when there was nothing to do, and
/// partial success when some non-fatal failures occurred.
///
/// # Errors
///
/// Only setup-level failures (none at present) surface as `Err`; every
/// scan or resolution failure is logged and degraded to an exit code.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let scanner = Scanner::new(PathFilter::with_defaults());
    let outcome = scanner.scan(&cli.path);

    let scan_failures = outcome.stats.failed;

    if outcome.records.is_empty() {
        println!("No files found to analyze.");
        // Scan failures still surface even when nothing was readable
        return Ok(exit_code_for(scan_failures, &resolve::ResolveStats::default()));
    }

    let groups = group_by_name(outcome.records);

    let tie_breaker = match cli.seed {
        Some(seed) => RandomTieBreaker::seeded(seed),
        None => RandomTieBreaker::new(),
    };
    let mut resolver = Resolver::new(tie_breaker);
    let stats = resolver.resolve(groups);

    let code = exit_code_for(scan_failures, &stats);
    match code {
        ExitCode::NothingToDo => {
            println!("Tree already resolved: no duplicates or conflicting versions.");
        }
        ExitCode::Success => {
            println!(
                "Resolved {} group(s): {} duplicate(s) deleted, {} merge(s) applied.",
                stats.groups_resolved,
                stats.duplicates_deleted,
                stats.version_merges + stats.conflict_merges
            );
        }
        _ => {}
    }
    Ok(code)
}

/// Map pipeline results to a process exit code.
///
/// Any non-fatal failure (unreadable files during the scan, failed deletes
/// or merges during resolution) yields partial success; otherwise the code
/// reflects whether any action was applied.
fn exit_code_for(scan_failures: usize, stats: &resolve::ResolveStats) -> ExitCode {
    if scan_failures > 0 || !stats.all_succeeded() {
        ExitCode::PartialSuccess
    } else if stats.actions() == 0 {
        ExitCode::NothingToDo
    } else {
        ExitCode::Success
    }
}

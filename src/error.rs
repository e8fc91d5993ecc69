//! Structured error handling and exit codes.

use serde::Serialize;

/// Exit codes for the clearfile application.
///
/// - 0: Success (duplicates or versions were resolved)
/// - 1: General error (unexpected failure)
/// - 2: Nothing to do (no files found, or tree already resolved)
/// - 3: Partial success (completed with some non-fatal failures)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Scan completed and resolution actions were applied.
    Success = 0,
    /// An unexpected error occurred.
    GeneralError = 1,
    /// Nothing needed resolving.
    NothingToDo = 2,
    /// Completed, but some files could not be read, deleted or merged.
    PartialSuccess = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "CF000",
            Self::GeneralError => "CF001",
            Self::NothingToDo => "CF002",
            Self::PartialSuccess => "CF003",
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "CF001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: err.to_string(),
        }
    }
}

//! Exit status codes for the CLI
//!
//! curlgen follows standard Unix exit code conventions:
//! - 0: Every input converted
//! - 1: At least one input failed (parse error, unsupported feature, I/O)

use std::process::{ExitCode, Termination};

/// Exit status codes following standard Unix conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    /// Successful execution
    Success = 0,
    /// Any error
    Error = 1,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}

impl ExitStatus {
    /// Error if any of a batch failed
    pub fn from_failures(failures: usize) -> Self {
        if failures == 0 {
            ExitStatus::Success
        } else {
            ExitStatus::Error
        }
    }
}

//! Types for sandboxed execution

use std::fmt;

/// Why an execution did not pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionReason {
    /// The code ran to completion and reported success
    None,
    /// The deadline passed and the process group was killed
    Timeout,
    /// The process exited non-zero; `None` when it died by signal
    NonZeroExit(Option<i32>),
    /// Clean exit without a success report (the code raised or exited early)
    RuntimeFailure,
}

impl fmt::Display for ExecutionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionReason::None => write!(f, "passed"),
            ExecutionReason::Timeout => write!(f, "timed out"),
            ExecutionReason::NonZeroExit(Some(code)) => write!(f, "exited with status {}", code),
            ExecutionReason::NonZeroExit(None) => write!(f, "killed by signal"),
            ExecutionReason::RuntimeFailure => write!(f, "failed at runtime"),
        }
    }
}

/// Result of one sandboxed execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Whether the code ran and reported success
    pub passed: bool,
    /// Failure reason, [`ExecutionReason::None`] when passed
    pub reason: ExecutionReason,
}

impl ExecutionOutcome {
    pub(crate) fn passed() -> Self {
        Self {
            passed: true,
            reason: ExecutionReason::None,
        }
    }

    pub(crate) fn failed(reason: ExecutionReason) -> Self {
        Self {
            passed: false,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_display() {
        assert_eq!(ExecutionReason::Timeout.to_string(), "timed out");
        assert_eq!(
            ExecutionReason::NonZeroExit(Some(3)).to_string(),
            "exited with status 3"
        );
        assert_eq!(ExecutionReason::NonZeroExit(None).to_string(), "killed by signal");
    }

    #[test]
    fn test_constructors() {
        assert!(ExecutionOutcome::passed().passed);
        let failed = ExecutionOutcome::failed(ExecutionReason::RuntimeFailure);
        assert!(!failed.passed);
        assert_eq!(failed.reason, ExecutionReason::RuntimeFailure);
    }
}

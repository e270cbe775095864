//! Result aggregation and reporting.
//!
//! Collects check results in execution order and generates summaries.

use crate::Check;
use serde::Serialize;

/// Result summary statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub passed: u32,
    pub failed: u32,
    pub total: u32,
    pub total_duration_ms: u64,
}

impl ResultSummary {
    /// True when no check failed. An empty run passes vacuously.
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

/// Validation report containing all check results
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub timestamp: u64,
    pub hostname: String,
    pub kernel_release: Option<String>,
    pub checks: Vec<Check>,
    pub total_duration_ms: u64,
}

impl ValidationReport {
    /// Create a new empty report
    pub fn new() -> Self {
        ValidationReport {
            timestamp: crate::platform::linux::get_unix_timestamp(),
            hostname: String::new(),
            kernel_release: None,
            checks: Vec::new(),
            total_duration_ms: 0,
        }
    }

    /// Calculate summary statistics
    pub fn summary(&self) -> ResultSummary {
        summarize(&self.checks)
    }

    /// True iff every recorded check passed
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(Check::passed)
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

fn summarize(checks: &[Check]) -> ResultSummary {
    let mut summary = ResultSummary::default();

    for check in checks {
        summary.total += 1;
        if check.passed() {
            summary.passed += 1;
        } else {
            summary.failed += 1;
        }
        if let Some(ref result) = check.result {
            summary.total_duration_ms += result.duration_ms();
        }
    }

    summary
}

/// Result aggregator for collecting check results
pub struct ResultAggregator {
    checks: Vec<Check>,
    hostname: String,
    kernel_release: Option<String>,
    total_duration_ms: u64,
}

impl ResultAggregator {
    /// Create a new result aggregator
    pub fn new() -> Self {
        ResultAggregator {
            checks: Vec::new(),
            hostname: String::new(),
            kernel_release: None,
            total_duration_ms: 0,
        }
    }

    /// Set report metadata
    pub fn set_metadata(&mut self, hostname: String, kernel_release: Option<String>, total_duration_ms: u64) {
        self.hostname = hostname;
        self.kernel_release = kernel_release;
        self.total_duration_ms = total_duration_ms;
    }

    /// Add a completed check result
    pub fn add_result(&mut self, check: Check) {
        self.checks.push(check);
    }

    /// Create final validation report
    pub fn into_report(self) -> ValidationReport {
        ValidationReport {
            timestamp: crate::platform::linux::get_unix_timestamp(),
            hostname: self.hostname,
            kernel_release: self.kernel_release,
            checks: self.checks,
            total_duration_ms: self.total_duration_ms,
        }
    }
}

impl Default for ResultAggregator {
    fn default() -> Self {
        Self::new()
    }
}

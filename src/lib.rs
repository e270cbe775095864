//! snowball-check library
//!
//! Build and source validation harness for the Blue Snowball USB audio kernel driver.
//!
//! The harness runs a fixed, ordered list of checks against a driver source tree:
//! - File layout of the driver tree
//! - Makefile dry-run and a real module build
//! - Source text checks for error handling and ALSA registration calls
//! - `modinfo` metadata of the built module (dependencies, USB device table)
//!
//! Every check records a pass/fail result with a detail message. A failing or
//! faulting check never prevents later checks from running.
//!
//! # Example
//!
//! ```no_run
//! use snowball_check::{run_checks, HarnessConfig};
//!
//! let config = HarnessConfig::default();
//! let report = run_checks(config).expect("target directory missing");
//! println!("Checks passed: {}", report.summary().passed);
//! ```

pub mod checks;
pub mod cli;
pub mod engine;
pub mod platform;
pub mod version;

use checks::{CheckContext, DriverTarget};
use cli::args::{Args, CategoryFilter};
use engine::orchestrator::{create_all_checks, CheckOrchestrator};
use engine::result::ValidationReport;
use platform::command::{CommandRunner, ShellRunner};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

// Re-exports for public API
pub use engine::orchestrator::CheckOrchestrator as Orchestrator;
pub use engine::result::{ResultSummary, ValidationReport as Report};

/// Default per-command timeout.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CheckResult {
    /// Check passed
    Pass { details: String, duration_ms: u64 },
    /// Check failed
    Fail { details: String, duration_ms: u64 },
}

impl CheckResult {
    pub fn pass(details: impl Into<String>) -> Self {
        CheckResult::Pass {
            details: details.into(),
            duration_ms: 0,
        }
    }

    pub fn fail(details: impl Into<String>) -> Self {
        CheckResult::Fail {
            details: details.into(),
            duration_ms: 0,
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, CheckResult::Pass { .. })
    }

    pub fn details(&self) -> &str {
        match self {
            CheckResult::Pass { details, .. } | CheckResult::Fail { details, .. } => details,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        match self {
            CheckResult::Pass { duration_ms, .. } | CheckResult::Fail { duration_ms, .. } => *duration_ms,
        }
    }

    /// Replace the recorded duration.
    pub fn with_duration(mut self, elapsed_ms: u64) -> Self {
        match &mut self {
            CheckResult::Pass { duration_ms, .. } | CheckResult::Fail { duration_ms, .. } => {
                *duration_ms = elapsed_ms
            }
        }
        self
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckResult::Pass { details, .. } => write!(f, "PASS: {}", details),
            CheckResult::Fail { details, .. } => write!(f, "FAIL: {}", details),
        }
    }
}

/// Check category for grouping related checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CheckCategory {
    /// Presence of the driver tree's files
    Layout,
    /// Makefile targets and module compilation
    Build,
    /// Static inspection of the driver source text
    Source,
    /// Metadata of the compiled module artifact
    Module,
}

impl fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckCategory::Layout => write!(f, "Layout"),
            CheckCategory::Build => write!(f, "Build"),
            CheckCategory::Source => write!(f, "Source"),
            CheckCategory::Module => write!(f, "Module"),
        }
    }
}

/// A validation check with its result.
#[derive(Debug, Clone, Serialize)]
pub struct Check {
    /// Unique identifier (e.g., "SRC-002")
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Check category
    pub category: CheckCategory,
    /// Description of what this check validates
    pub description: String,
    /// Result of the check (None if not yet executed)
    pub result: Option<CheckResult>,
}

impl Check {
    /// Whether the check ran and passed.
    pub fn passed(&self) -> bool {
        self.result.as_ref().is_some_and(CheckResult::passed)
    }

    pub fn details(&self) -> &str {
        self.result.as_ref().map(CheckResult::details).unwrap_or("Not executed")
    }
}

/// Error types for snowball-check operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HarnessError {
    /// External command exceeded its timeout
    #[error("Command timed out after {}s: {command}", .timeout.as_secs_f64())]
    Timeout { command: String, timeout: Duration },
    /// External command could not be started or waited on
    #[error("Command '{command}' could not be executed: {message}")]
    Spawn { command: String, message: String },
    /// I/O error
    #[error("I/O error in {context}: {message}")]
    Io { context: String, message: String },
    /// The driver tree to inspect does not exist
    #[error("Target directory not found: {}", .path.display())]
    MissingTarget { path: PathBuf },
}

/// Configuration for running validation checks.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Directory containing the driver tree
    pub target_dir: PathBuf,
    /// Kernel module name (source is `<name>.c`, artifact is `<name>.ko`)
    pub module_name: String,
    /// Build-variant makefile passed to `make -f`
    pub makefile: String,
    /// Timeout applied to each external command
    pub command_timeout: Duration,
    /// Categories to run (None = all)
    pub categories: Option<Vec<CheckCategory>>,
    /// Specific checks to skip (by ID)
    pub skip_checks: Vec<String>,
    /// Specific checks to run (by ID)
    pub only_checks: Vec<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            target_dir: PathBuf::from("."),
            module_name: checks::DEFAULT_MODULE_NAME.to_string(),
            makefile: checks::DEFAULT_MAKEFILE.to_string(),
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            categories: None,
            skip_checks: Vec::new(),
            only_checks: Vec::new(),
        }
    }
}

impl HarnessConfig {
    /// Create configuration from command line arguments
    pub fn from_args(args: &Args) -> Self {
        let categories = if args.categories.is_empty() || args.categories.contains(&CategoryFilter::All) {
            None
        } else {
            Some(args.categories.iter().filter_map(CategoryFilter::category).collect())
        };

        HarnessConfig {
            target_dir: args.dir.clone(),
            module_name: args.module.clone(),
            makefile: args.makefile.clone(),
            command_timeout: Duration::from_secs(args.timeout),
            categories,
            skip_checks: args.skip.clone(),
            only_checks: args.only.clone(),
        }
    }

    fn driver_target(&self) -> DriverTarget {
        DriverTarget {
            root: self.target_dir.clone(),
            module_name: self.module_name.clone(),
            makefile: self.makefile.clone(),
        }
    }
}

/// Run validation checks against the real toolchain.
///
/// # Example
///
/// ```no_run
/// use snowball_check::{run_checks, HarnessConfig, CheckCategory};
///
/// // Only inspect the driver source text
/// let config = HarnessConfig {
///     categories: Some(vec![CheckCategory::Source]),
///     ..Default::default()
/// };
///
/// match run_checks(config) {
///     Ok(report) => {
///         let summary = report.summary();
///         println!("Passed: {}, Failed: {}", summary.passed, summary.failed);
///     }
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_checks(config: HarnessConfig) -> Result<ValidationReport, HarnessError> {
    run_checks_with(config, Box::new(ShellRunner), |_| {})
}

/// Run validation checks with a custom command runner, reporting each
/// result to `observer` as soon as it is recorded.
pub fn run_checks_with<F>(
    config: HarnessConfig,
    runner: Box<dyn CommandRunner>,
    mut observer: F,
) -> Result<ValidationReport, HarnessError>
where
    F: FnMut(&Check),
{
    if !config.target_dir.is_dir() {
        return Err(HarnessError::MissingTarget {
            path: config.target_dir.clone(),
        });
    }

    let context = CheckContext::new(config.driver_target(), runner, config.command_timeout);
    let mut orchestrator = CheckOrchestrator::new(context);
    orchestrator.register_checks(create_all_checks());

    let report = if !config.only_checks.is_empty() {
        orchestrator.run_specific_with(&config.only_checks, &mut observer)
    } else if !config.skip_checks.is_empty() {
        orchestrator.run_excluding_with(&config.skip_checks, &mut observer)
    } else if let Some(ref categories) = config.categories {
        orchestrator.run_categories_with(categories, &mut observer)
    } else {
        orchestrator.run_all_with(&mut observer)
    };

    Ok(report)
}

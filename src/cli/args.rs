//! Command line arguments for snowball-check.

use crate::CheckCategory;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command to execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Subcommand)]
pub enum Command {
    /// Run validation checks (default)
    #[default]
    Check,
    /// List all available checks
    List,
    /// Print version and build information
    Version,
}

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
    /// JUnit XML for CI/CD integration
    Junit,
}

/// Check category filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryFilter {
    /// Run all checks
    All,
    /// Required files of the driver tree
    Layout,
    /// Makefile dry-run and module compilation
    Build,
    /// Driver source text inspection
    Source,
    /// modinfo metadata of the built module
    Module,
}

impl CategoryFilter {
    /// The category selected, or None for `all`
    pub fn category(&self) -> Option<CheckCategory> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Layout => Some(CheckCategory::Layout),
            CategoryFilter::Build => Some(CheckCategory::Build),
            CategoryFilter::Source => Some(CheckCategory::Source),
            CategoryFilter::Module => Some(CheckCategory::Module),
        }
    }
}

/// Build and source validation for the Blue Snowball USB audio driver.
///
/// Exit codes: 0 when every check passed, 1 when any check failed, 2 on usage errors.
#[derive(Debug, Clone, Parser)]
#[command(name = "snowball-check", version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Driver source tree to inspect
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".", global = true)]
    pub dir: PathBuf,

    /// Kernel module name; source is <MODULE>.c and the artifact <MODULE>.ko
    #[arg(long, default_value = crate::checks::DEFAULT_MODULE_NAME, global = true)]
    pub module: String,

    /// Build-variant makefile passed to `make -f`
    #[arg(long, default_value = crate::checks::DEFAULT_MAKEFILE, global = true)]
    pub makefile: String,

    /// Timeout for each external command, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 10, global = true)]
    pub timeout: u64,

    /// Only run checks in this category (repeatable)
    #[arg(long = "category", value_enum, value_name = "CATEGORY", global = true)]
    pub categories: Vec<CategoryFilter>,

    /// Skip a check by ID (repeatable)
    #[arg(long, value_name = "ID", global = true)]
    pub skip: Vec<String>,

    /// Run only this check by ID (repeatable)
    #[arg(long, value_name = "ID", global = true)]
    pub only: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Only output failures
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Include durations in the report
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

impl Args {
    /// Selected command, `check` when none was given
    pub fn command(&self) -> Command {
        self.command.unwrap_or_default()
    }
}

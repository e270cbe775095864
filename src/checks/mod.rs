//! Validation check implementations.
//!
//! Each check is a predicate over either the output of an external command
//! or the text of a file in the driver tree:
//! - Layout checks (LAY-001)
//! - Build checks (BLD-001, BLD-002)
//! - Source checks (SRC-001, SRC-002)
//! - Module checks (MOD-001 through MOD-003)

pub mod build;
pub mod layout;
pub mod module;
pub mod source;

use crate::platform::command::{CommandOutput, CommandRunner};
use crate::HarnessError;
use log::warn;
use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Module name of the Blue Snowball driver.
pub const DEFAULT_MODULE_NAME: &str = "blue_snowball";

/// Build-variant makefile used for dry-run and real builds.
pub const DEFAULT_MAKEFILE: &str = "Makefile.flexible";

/// The driver tree under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverTarget {
    pub root: PathBuf,
    pub module_name: String,
    pub makefile: String,
}

impl DriverTarget {
    /// `<module>.c`, relative to the root
    pub fn source_file(&self) -> String {
        format!("{}.c", self.module_name)
    }

    /// `<module>.ko`, relative to the root
    pub fn artifact_file(&self) -> String {
        format!("{}.ko", self.module_name)
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl Default for DriverTarget {
    fn default() -> Self {
        DriverTarget {
            root: PathBuf::from("."),
            module_name: DEFAULT_MODULE_NAME.to_string(),
            makefile: DEFAULT_MAKEFILE.to_string(),
        }
    }
}

/// Everything a check may touch: the driver tree and the command runner.
pub struct CheckContext {
    pub target: DriverTarget,
    runner: Box<dyn CommandRunner>,
    timeout: Duration,
}

impl CheckContext {
    pub fn new(target: DriverTarget, runner: Box<dyn CommandRunner>, timeout: Duration) -> Self {
        CheckContext {
            target,
            runner,
            timeout,
        }
    }

    /// Run a command in the target root.
    ///
    /// Timeouts and spawn failures come back as unsuccessful output whose
    /// stderr names the cause, so checks treat them like a nonzero exit.
    pub fn run(&self, command: &str) -> CommandOutput {
        match self.runner.run(command, &self.target.root, self.timeout) {
            Ok(output) => output,
            Err(e) => {
                warn!("{}", e);
                CommandOutput::from_error(&e)
            }
        }
    }

    pub fn exists(&self, name: &str) -> bool {
        self.target.path(name).exists()
    }

    /// Read a file of the driver tree; a missing file is a check fault.
    pub fn read_source(&self, name: &str) -> Result<String, HarnessError> {
        let path = self.target.path(name);
        fs::read_to_string(&path).map_err(|e| HarnessError::Io {
            context: format!("reading {}", path.display()),
            message: e.to_string(),
        })
    }
}

/// Items of `expected` that `haystack` does not contain, in order.
pub(crate) fn missing_from<'a>(haystack: &str, expected: &[&'a str]) -> Vec<&'a str> {
    expected.iter().copied().filter(|item| !haystack.contains(item)).collect()
}

/// Quote `word` for `sh -c` unless it is made only of shell-inert characters.
pub(crate) fn shell_quote(word: &str) -> Cow<'_, str> {
    let inert = |c: char| c.is_ascii_alphanumeric() || "_-.,/:=+@%".contains(c);
    if !word.is_empty() && word.chars().all(inert) {
        Cow::Borrowed(word)
    } else {
        Cow::Owned(format!("'{}'", word.replace('\'', r"'\''")))
    }
}

/// Render names as a bracketed, quoted list: `['a', 'b']`.
pub(crate) fn format_list(items: &[&str]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| format!("'{}'", item)).collect();
    format!("[{}]", quoted.join(", "))
}

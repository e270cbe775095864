//! Driver tree layout check (LAY-001).

use super::{format_list, CheckContext};
use crate::{CheckResult, HarnessError};

/// Fixed files every driver tree ships besides the module source.
pub const SUPPORT_FILES: [&str; 3] = ["Makefile", "test_suite.sh", "Dockerfile"];

/// Run LAY-001: File Structure
pub fn check_file_structure(ctx: &CheckContext) -> Result<CheckResult, HarnessError> {
    let source = ctx.target.source_file();
    let required = std::iter::once(source.as_str()).chain(SUPPORT_FILES);

    let missing: Vec<&str> = required.filter(|name| !ctx.exists(name)).collect();

    if missing.is_empty() {
        Ok(CheckResult::pass("All required files present"))
    } else {
        Ok(CheckResult::fail(format!("Missing files: {}", format_list(&missing))))
    }
}

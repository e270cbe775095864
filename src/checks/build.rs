//! Build checks (BLD-001, BLD-002).
//!
//! Both drive `make` against the build-variant makefile. BLD-002 performs a
//! real `clean` + `all` build and leaves the module artifact behind for the
//! module metadata checks.

use super::{shell_quote, CheckContext};
use crate::{CheckResult, HarnessError};

/// Run BLD-001: Makefile Targets
pub fn check_makefile_targets(ctx: &CheckContext) -> Result<CheckResult, HarnessError> {
    let output = ctx.run(&format!("make -f {} -n clean", shell_quote(&ctx.target.makefile)));

    if output.succeeded {
        Ok(CheckResult::pass("Makefile targets accessible"))
    } else {
        Ok(CheckResult::fail(format!("Makefile issues: {}", output.stderr.trim())))
    }
}

/// Run BLD-002: Module Compilation
pub fn check_module_compilation(ctx: &CheckContext) -> Result<CheckResult, HarnessError> {
    let makefile = shell_quote(&ctx.target.makefile);
    let output = ctx.run(&format!("make -f {0} clean && make -f {0} all", makefile));
    let artifact = ctx.target.artifact_file();

    if !output.succeeded {
        return Ok(CheckResult::fail(format!("Compilation failed: {}", output.stderr.trim())));
    }

    if ctx.exists(&artifact) {
        Ok(CheckResult::pass("Module compiled successfully"))
    } else {
        Ok(CheckResult::fail(format!(
            "Compilation failed: build succeeded but {} was not produced",
            artifact
        )))
    }
}

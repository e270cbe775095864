//! Module metadata checks (MOD-001 through MOD-003).
//!
//! All three query `modinfo` on the artifact produced by BLD-002. They do not
//! depend on that check having passed; a stale artifact is inspected as-is.

use super::{format_list, shell_quote, CheckContext};
use crate::{CheckResult, HarnessError};

/// Modules the driver must declare as dependencies.
pub const EXPECTED_DEPENDENCIES: [&str; 3] = ["snd", "snd_pcm", "usbcore"];

/// Blue Snowball USB vendor ID, as it appears in a modalias.
pub const USB_VENDOR_ID: &str = "0d8c";

/// Blue Snowball USB product ID, as it appears in a modalias.
pub const USB_PRODUCT_ID: &str = "0013";

/// Run MOD-001: Module Info
pub fn check_module_info(ctx: &CheckContext) -> Result<CheckResult, HarnessError> {
    let artifact = ctx.target.artifact_file();
    if !ctx.exists(&artifact) {
        return Ok(CheckResult::fail("Module file not found"));
    }

    let output = ctx.run(&format!("modinfo {}", shell_quote(&artifact)));
    let module_name = ctx.target.module_name.to_lowercase();

    if output.succeeded && output.stdout.to_lowercase().contains(&module_name) {
        Ok(CheckResult::pass("Module info accessible"))
    } else {
        Ok(CheckResult::fail(format!("Failed to get module info: {}", output.stderr.trim())))
    }
}

/// Run MOD-002: Module Dependencies
pub fn check_module_dependencies(ctx: &CheckContext) -> Result<CheckResult, HarnessError> {
    let output = ctx.run(&format!("modinfo -F depends {}", shell_quote(&ctx.target.artifact_file())));
    if !output.succeeded {
        return Ok(CheckResult::fail(format!(
            "Failed to check dependencies: {}",
            output.stderr.trim()
        )));
    }

    let deps = output.stdout.trim();
    let declared = parse_depends(deps);
    let missing: Vec<&str> = EXPECTED_DEPENDENCIES
        .iter()
        .copied()
        .filter(|dep| !declared.contains(&normalize_module_name(dep)))
        .collect();

    if missing.is_empty() {
        Ok(CheckResult::pass(format!("All dependencies present: {}", deps)))
    } else {
        Ok(CheckResult::fail(format!("Missing dependencies: {}", format_list(&missing))))
    }
}

/// Run MOD-003: USB Device Table
pub fn check_usb_device_table(ctx: &CheckContext) -> Result<CheckResult, HarnessError> {
    let output = ctx.run(&format!("modinfo -F alias {}", shell_quote(&ctx.target.artifact_file())));

    if output.succeeded && has_device_id(&output.stdout) {
        Ok(CheckResult::pass("Blue Snowball USB ID found in module"))
    } else {
        Ok(CheckResult::fail("Blue Snowball USB ID not found in module"))
    }
}

/// Split a `modinfo -F depends` line into normalized module names.
pub fn parse_depends(deps: &str) -> Vec<String> {
    deps.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|name| !name.is_empty())
        .map(normalize_module_name)
        .collect()
}

/// The kernel treats `-` and `_` in module names as the same character.
pub fn normalize_module_name(name: &str) -> String {
    name.replace('-', "_")
}

/// Whether modalias output names the Blue Snowball vendor and product IDs.
pub fn has_device_id(aliases: &str) -> bool {
    aliases.to_lowercase().contains(USB_VENDOR_ID) && aliases.contains(USB_PRODUCT_ID)
}

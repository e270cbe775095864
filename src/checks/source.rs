//! Driver source text checks (SRC-001, SRC-002).
//!
//! These are plain substring searches over `<module>.c`; no parsing is done.
//! An unreadable source file is a fault, not a failed predicate, and is
//! reported by the orchestrator.

use super::{format_list, missing_from, CheckContext};
use crate::{CheckResult, HarnessError};

/// Required source patterns with the issue reported when one is absent.
pub const QUALITY_PATTERNS: [(&str, &str); 3] = [
    ("if (!device)", "Missing NULL pointer checks"),
    ("kfree", "Missing memory cleanup"),
    ("usb_register", "Missing USB driver registration"),
];

/// ALSA calls a sound-card driver must make.
pub const ALSA_FUNCTIONS: [&str; 3] = ["snd_card_new", "snd_pcm_new", "snd_card_register"];

/// Run SRC-001: Code Quality
pub fn check_code_quality(ctx: &CheckContext) -> Result<CheckResult, HarnessError> {
    let content = ctx.read_source(&ctx.target.source_file())?;

    let issues: Vec<&str> = QUALITY_PATTERNS
        .iter()
        .filter(|(pattern, _)| !content.contains(pattern))
        .map(|(_, issue)| *issue)
        .collect();

    if issues.is_empty() {
        Ok(CheckResult::pass("Code quality checks passed"))
    } else {
        Ok(CheckResult::fail(format!("Issues found: {}", issues.join(", "))))
    }
}

/// Run SRC-002: ALSA Integration
pub fn check_alsa_integration(ctx: &CheckContext) -> Result<CheckResult, HarnessError> {
    let content = ctx.read_source(&ctx.target.source_file())?;
    let missing = missing_from(&content, &ALSA_FUNCTIONS);

    if missing.is_empty() {
        Ok(CheckResult::pass("All ALSA functions present"))
    } else {
        Ok(CheckResult::fail(format!("Missing ALSA functions: {}", format_list(&missing))))
    }
}

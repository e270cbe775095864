//! Output formatting for snowball-check.
//!
//! Provides the running progress line plus terminal, JSON, and JUnit XML
//! report formatters.
//!
//! # Graceful Degradation
//!
//! - Non-TTY output: Color disabled via --no-color
//! - Empty reports: Produces valid output with zero checks
//! - Serialization failure: JSON formatter falls back to an error object
//!
//! All formatters produce valid output for any ValidationReport input.

use crate::cli::args::OutputFormat;
use crate::engine::result::{ResultSummary, ValidationReport};
use crate::version::get_build_info;
use crate::{Check, CheckCategory};
use serde::Serialize;

const RULE: &str = "============================================================";

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format a validation report into a string
    fn format(&self, report: &ValidationReport) -> String;
}

/// Banner printed before the checks start.
pub fn banner() -> String {
    format!("{}\nBlue Snowball Driver Test Suite\n{}", RULE, RULE)
}

/// `[PASS] name: details` line printed as each check completes.
pub fn progress_line(check: &Check, color: bool) -> String {
    let status = if check.passed() {
        colorize("[PASS]", "32", color)
    } else {
        colorize("[FAIL]", "31", color)
    };
    format!("{} {}: {}", status, check.name, check.details())
}

fn colorize(text: &str, color_code: &str, enabled: bool) -> String {
    if enabled {
        format!("\x1b[{}m{}\x1b[0m", color_code, text)
    } else {
        text.to_string()
    }
}

/// Terminal (human-readable) formatter
pub struct TerminalFormatter {
    color: bool,
    verbose: bool,
    quiet: bool,
}

impl TerminalFormatter {
    pub fn new(color: bool, verbose: bool, quiet: bool) -> Self {
        TerminalFormatter { color, verbose, quiet }
    }
}

impl OutputFormatter for TerminalFormatter {
    fn format(&self, report: &ValidationReport) -> String {
        let summary = report.summary();
        let mut output = String::new();

        output.push('\n');
        output.push_str(RULE);
        output.push('\n');
        output.push_str(&format!(
            "Test Results: {}/{} tests passed\n",
            summary.passed, summary.total
        ));
        output.push_str(RULE);
        output.push('\n');

        for check in &report.checks {
            if self.quiet && check.passed() {
                continue;
            }

            let marker = if check.passed() {
                colorize("✓", "32", self.color)
            } else {
                colorize("✗", "31", self.color)
            };

            output.push_str(&format!("{} {}: {}", marker, check.name, check.details()));
            if self.verbose {
                let duration_ms = check.result.as_ref().map(|r| r.duration_ms()).unwrap_or(0);
                output.push_str(&format!(" [{}, {}ms]", check.id, duration_ms));
            }
            output.push('\n');
        }

        if self.verbose {
            output.push_str(&format!("Harness: snowball-check {}\n", get_build_info().short()));
            output.push_str(&format!("Host: {}\n", report.hostname));
            if let Some(ref release) = report.kernel_release {
                output.push_str(&format!("Kernel: {}\n", release));
            }
            output.push_str(&format!(
                "Total time: {:.1}s\n",
                report.total_duration_ms as f64 / 1000.0
            ));
        }

        // No trailing newline; callers println!
        output.pop();
        output
    }
}

/// JSON formatter
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        JsonFormatter { pretty }
    }
}

/// Serialized shape of a report
#[derive(Serialize)]
struct JsonReport<'a> {
    harness_version: String,
    timestamp: u64,
    hostname: &'a str,
    kernel_release: Option<&'a str>,
    total_duration_ms: u64,
    all_passed: bool,
    summary: ResultSummary,
    checks: &'a [Check],
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &ValidationReport) -> String {
        let document = JsonReport {
            harness_version: get_build_info().short(),
            timestamp: report.timestamp,
            hostname: &report.hostname,
            kernel_release: report.kernel_release.as_deref(),
            total_duration_ms: report.total_duration_ms,
            all_passed: report.all_passed(),
            summary: report.summary(),
            checks: &report.checks,
        };

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };

        rendered.unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string())
    }
}

/// JUnit XML formatter
pub struct JunitFormatter;

impl JunitFormatter {
    pub fn new() -> Self {
        JunitFormatter
    }

    fn escape_xml(s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '&' => result.push_str("&amp;"),
                '<' => result.push_str("&lt;"),
                '>' => result.push_str("&gt;"),
                '"' => result.push_str("&quot;"),
                '\'' => result.push_str("&apos;"),
                c => result.push(c),
            }
        }
        result
    }
}

impl Default for JunitFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JunitFormatter {
    fn format(&self, report: &ValidationReport) -> String {
        let mut output = String::new();
        output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");

        let summary = report.summary();
        output.push_str(&format!(
            "<testsuites tests=\"{}\" failures=\"{}\" errors=\"0\" time=\"{:.3}\">\n",
            summary.total,
            summary.failed,
            report.total_duration_ms as f64 / 1000.0
        ));

        let categories = [
            CheckCategory::Layout,
            CheckCategory::Build,
            CheckCategory::Source,
            CheckCategory::Module,
        ];

        for category in categories {
            let category_checks: Vec<&Check> = report.checks.iter().filter(|c| c.category == category).collect();

            if category_checks.is_empty() {
                continue;
            }

            let suite_name = category.to_string().to_lowercase();
            let suite_failures = category_checks.iter().filter(|c| !c.passed()).count();
            let suite_time: u64 = category_checks
                .iter()
                .filter_map(|c| c.result.as_ref().map(|r| r.duration_ms()))
                .sum();

            output.push_str(&format!(
                "  <testsuite name=\"{}\" tests=\"{}\" failures=\"{}\" errors=\"0\" time=\"{:.3}\">\n",
                suite_name,
                category_checks.len(),
                suite_failures,
                suite_time as f64 / 1000.0
            ));

            for check in category_checks {
                let time = check.result.as_ref().map(|r| r.duration_ms()).unwrap_or(0);

                output.push_str(&format!(
                    "    <testcase name=\"{}\" classname=\"snowball-check.{}\" time=\"{:.3}\">\n",
                    Self::escape_xml(&format!("{} {}", check.id, check.name)),
                    suite_name,
                    time as f64 / 1000.0
                ));

                if check.passed() {
                    output.push_str(&format!(
                        "      <system-out>{}</system-out>\n",
                        Self::escape_xml(check.details())
                    ));
                } else {
                    output.push_str(&format!(
                        "      <failure message=\"{}\" />\n",
                        Self::escape_xml(check.details())
                    ));
                }
                output.push_str("    </testcase>\n");
            }

            output.push_str("  </testsuite>\n");
        }

        output.push_str("</testsuites>");
        output
    }
}

/// Get a formatter based on the output format
pub fn get_formatter(format: OutputFormat, no_color: bool, verbose: bool, quiet: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TerminalFormatter::new(!no_color, verbose, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Junit => Box::new(JunitFormatter::new()),
    }
}

//! CLI integration tests.
//!
//! Run the built binary against temporary driver trees and check its
//! stdout and exit status.

use crate::mocks::{DriverFixture, BARE_SOURCE};
use snowball_check::platform::linux;
use std::path::Path;
use std::process::{Command, Output};

fn snowball_check(dir: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_snowball-check"))
        .arg("-C")
        .arg(dir)
        .args(["--category", "source", "--no-color"])
        .args(extra)
        .env_remove("RUST_LOG")
        .output()
        .expect("cannot run snowball-check")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_healthy_tree_exits_zero() {
    let fixture = DriverFixture::healthy();
    let output = snowball_check(fixture.path(), &[]);
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(0), "stdout:\n{}", out);
    assert!(out.contains("Blue Snowball Driver Test Suite"));
    assert!(out.contains("[PASS] Code Quality: Code quality checks passed"));
    assert!(out.contains("[PASS] ALSA Integration: All ALSA functions present"));
    assert!(out.contains("Test Results: 2/2 tests passed"));
    assert!(out.contains("✓ ALSA Integration: All ALSA functions present"));
}

#[test]
fn test_broken_source_exits_one() {
    let fixture = DriverFixture::healthy().with_file("blue_snowball.c", BARE_SOURCE);
    let output = snowball_check(fixture.path(), &[]);
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1), "stdout:\n{}", out);
    assert!(out.contains("Blue Snowball Driver Test Suite"));
    assert!(out.contains(
        "[FAIL] ALSA Integration: Missing ALSA functions: ['snd_card_new', 'snd_pcm_new', 'snd_card_register']"
    ));
    assert!(out.contains("Test Results: 0/2 tests passed"));
}

#[test]
fn test_progress_lines_precede_summary() {
    let fixture = DriverFixture::healthy();
    let out = stdout(&snowball_check(fixture.path(), &[]));

    let banner = out.find("Blue Snowball Driver Test Suite").unwrap();
    let quality = out.find("[PASS] Code Quality").unwrap();
    let alsa = out.find("[PASS] ALSA Integration").unwrap();
    let summary = out.find("Test Results:").unwrap();
    assert!(banner < quality && quality < alsa && alsa < summary);
}

#[test]
fn test_non_root_warning() {
    let fixture = DriverFixture::healthy();
    let out = stdout(&snowball_check(fixture.path(), &[]));
    let warning = "Warning: Some tests may require root privileges";

    if linux::is_root() {
        assert!(!out.contains(warning));
    } else {
        assert!(out.starts_with(warning));
    }
}

#[test]
fn test_quiet_hides_passing_lines() {
    let fixture = DriverFixture::healthy().with_file(
        "blue_snowball.c",
        "snd_card_new(); snd_pcm_new(); snd_card_register();\n",
    );
    let output = snowball_check(fixture.path(), &["--quiet"]);
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(!out.contains("[PASS]"));
    assert!(!out.contains("✓"));
    assert!(out.contains("[FAIL] Code Quality"));
    assert!(out.contains("Test Results: 1/2 tests passed"));
}

#[test]
fn test_json_format_is_pure_json() {
    let fixture = DriverFixture::healthy();
    let output = snowball_check(fixture.path(), &["--format", "json"]);
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(value["all_passed"], true);
    assert_eq!(value["summary"]["total"], 2);
}

#[test]
fn test_missing_target_directory_exits_one() {
    let fixture = DriverFixture::empty();
    let output = snowball_check(&fixture.path().join("absent"), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Target directory not found"));
}

#[test]
fn test_usage_error_exits_two() {
    let fixture = DriverFixture::healthy();
    let output = snowball_check(fixture.path(), &["--format", "xml"]);
    assert_eq!(output.status.code(), Some(2));
}

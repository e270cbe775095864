//! Individual check tests.
//!
//! Each check is run against a temporary driver tree and a scripted runner.

use crate::mocks::{DriverFixture, MockRunner, BARE_SOURCE};
use snowball_check::checks::{build, layout, module, source, CheckContext, DriverTarget};
use snowball_check::CheckResult;
use std::time::Duration;

fn details(result: &CheckResult) -> &str {
    assert!(!result.details().is_empty(), "details must never be empty");
    result.details()
}

// LAY-001

#[test]
fn test_file_structure_complete() {
    let fixture = DriverFixture::healthy();
    let result = layout::check_file_structure(&fixture.context(MockRunner::new())).unwrap();
    assert!(result.passed());
    assert_eq!(details(&result), "All required files present");
}

#[test]
fn test_file_structure_lists_missing_files() {
    let fixture = DriverFixture::healthy().without_file("Dockerfile").without_file("test_suite.sh");
    let result = layout::check_file_structure(&fixture.context(MockRunner::new())).unwrap();
    assert!(!result.passed());
    assert_eq!(details(&result), "Missing files: ['test_suite.sh', 'Dockerfile']");
}

#[test]
fn test_file_structure_empty_tree() {
    let fixture = DriverFixture::empty();
    let result = layout::check_file_structure(&fixture.context(MockRunner::new())).unwrap();
    assert!(!result.passed());
    assert!(details(&result).contains("blue_snowball.c"));
    assert!(details(&result).contains("Makefile"));
}

// BLD-001

#[test]
fn test_makefile_targets_dry_run() {
    let fixture = DriverFixture::healthy();
    let runner = MockRunner::healthy();
    let result = build::check_makefile_targets(&fixture.context(runner.clone())).unwrap();
    assert!(result.passed());
    assert_eq!(runner.calls(), vec!["make -f Makefile.flexible -n clean"]);
}

#[test]
fn test_makefile_and_module_names_are_shell_quoted() {
    let fixture = DriverFixture::healthy();
    let runner = MockRunner::new()
        .succeed("make", "")
        .succeed("modinfo", "usb:v0D8Cp0013d*\n");
    let target = DriverTarget {
        module_name: "blue snowball".to_string(),
        makefile: "Makefile.flexible; touch pwned".to_string(),
        ..fixture.target()
    };
    let ctx = CheckContext::new(target, Box::new(runner.clone()), Duration::from_secs(10));

    build::check_makefile_targets(&ctx).unwrap();
    module::check_usb_device_table(&ctx).unwrap();

    assert_eq!(
        runner.calls(),
        vec![
            "make -f 'Makefile.flexible; touch pwned' -n clean",
            "modinfo -F alias 'blue snowball.ko'",
        ]
    );
}

#[test]
fn test_makefile_targets_nonzero_exit() {
    let fixture = DriverFixture::healthy();
    let runner = MockRunner::new().fail("make", "make: Makefile.flexible: No such file or directory");
    let result = build::check_makefile_targets(&fixture.context(runner)).unwrap();
    assert!(!result.passed());
    assert_eq!(
        details(&result),
        "Makefile issues: make: Makefile.flexible: No such file or directory"
    );
}

#[test]
fn test_makefile_targets_timeout() {
    let fixture = DriverFixture::healthy();
    let runner = MockRunner::new().time_out("make");
    let result = build::check_makefile_targets(&fixture.context(runner)).unwrap();
    assert!(!result.passed());
    assert!(details(&result).contains("timed out"));
}

// SRC-001

#[test]
fn test_code_quality_passes_on_healthy_source() {
    let fixture = DriverFixture::healthy();
    let result = source::check_code_quality(&fixture.context(MockRunner::new())).unwrap();
    assert!(result.passed());
    assert_eq!(details(&result), "Code quality checks passed");
}

#[test]
fn test_code_quality_reports_every_issue() {
    let fixture = DriverFixture::healthy().with_file("blue_snowball.c", BARE_SOURCE);
    let result = source::check_code_quality(&fixture.context(MockRunner::new())).unwrap();
    assert!(!result.passed());
    assert_eq!(
        details(&result),
        "Issues found: Missing NULL pointer checks, Missing memory cleanup, Missing USB driver registration"
    );
}

#[test]
fn test_code_quality_single_issue() {
    let fixture = DriverFixture::healthy().with_file(
        "blue_snowball.c",
        "if (!device) return; kfree(p); usb_deregister(&drv);",
    );
    let result = source::check_code_quality(&fixture.context(MockRunner::new())).unwrap();
    assert!(!result.passed());
    assert_eq!(details(&result), "Issues found: Missing USB driver registration");
}

#[test]
fn test_code_quality_missing_source_is_error() {
    let fixture = DriverFixture::healthy().without_file("blue_snowball.c");
    let err = source::check_code_quality(&fixture.context(MockRunner::new())).unwrap_err();
    assert!(err.to_string().contains("blue_snowball.c"));
}

// SRC-002

#[test]
fn test_alsa_integration_present() {
    let fixture = DriverFixture::healthy();
    let result = source::check_alsa_integration(&fixture.context(MockRunner::new())).unwrap();
    assert!(result.passed());
    assert_eq!(details(&result), "All ALSA functions present");
}

#[test]
fn test_alsa_integration_lists_all_missing_functions() {
    let fixture = DriverFixture::healthy().with_file("blue_snowball.c", BARE_SOURCE);
    let result = source::check_alsa_integration(&fixture.context(MockRunner::new())).unwrap();
    assert!(!result.passed());
    let details = details(&result);
    assert!(details.starts_with("Missing ALSA functions: "));
    for name in ["snd_card_new", "snd_pcm_new", "snd_card_register"] {
        assert!(details.contains(name), "{} not listed in {}", name, details);
    }
}

// BLD-002

#[test]
fn test_module_compilation_success() {
    let fixture = DriverFixture::healthy();
    let runner = MockRunner::healthy();
    let result = build::check_module_compilation(&fixture.context(runner.clone())).unwrap();
    assert!(result.passed());
    assert_eq!(
        runner.calls(),
        vec!["make -f Makefile.flexible clean && make -f Makefile.flexible all"]
    );
}

#[test]
fn test_module_compilation_without_artifact() {
    let fixture = DriverFixture::healthy().without_file("blue_snowball.ko");
    let result = build::check_module_compilation(&fixture.context(MockRunner::healthy())).unwrap();
    assert!(!result.passed());
    assert!(details(&result).contains("blue_snowball.ko"));
}

#[test]
fn test_module_compilation_build_error() {
    let fixture = DriverFixture::healthy();
    let runner = MockRunner::new().fail("make", "blue_snowball.c:42: error: expected ';'");
    let result = build::check_module_compilation(&fixture.context(runner)).unwrap();
    assert!(!result.passed());
    assert_eq!(details(&result), "Compilation failed: blue_snowball.c:42: error: expected ';'");
}

#[test]
fn test_module_compilation_timeout() {
    let fixture = DriverFixture::healthy();
    let runner = MockRunner::new().time_out("make");
    let result = build::check_module_compilation(&fixture.context(runner)).unwrap();
    assert!(!result.passed());
    assert!(details(&result).starts_with("Compilation failed: Command timed out"));
}

// MOD-001

#[test]
fn test_module_info_accessible() {
    let fixture = DriverFixture::healthy();
    let result = module::check_module_info(&fixture.context(MockRunner::healthy())).unwrap();
    assert!(result.passed());
}

#[test]
fn test_module_info_without_artifact() {
    let fixture = DriverFixture::healthy().without_file("blue_snowball.ko");
    let runner = MockRunner::healthy();
    let result = module::check_module_info(&fixture.context(runner.clone())).unwrap();
    assert!(!result.passed());
    assert_eq!(details(&result), "Module file not found");
    assert!(runner.calls().is_empty());
}

#[test]
fn test_module_info_wrong_module() {
    let fixture = DriverFixture::healthy();
    let runner = MockRunner::new().succeed("modinfo", "name:           snd_usb_audio\n");
    let result = module::check_module_info(&fixture.context(runner)).unwrap();
    assert!(!result.passed());
    assert!(details(&result).starts_with("Failed to get module info"));
}

// MOD-002

#[test]
fn test_module_dependencies_present() {
    let fixture = DriverFixture::healthy();
    let result = module::check_module_dependencies(&fixture.context(MockRunner::healthy())).unwrap();
    assert!(result.passed());
    assert_eq!(details(&result), "All dependencies present: snd-pcm,snd,usbcore");
}

#[test]
fn test_module_dependencies_missing_usbcore() {
    let fixture = DriverFixture::healthy();
    let runner = MockRunner::healthy().succeed("modinfo -F depends", "snd-pcm,snd\n");
    let result = module::check_module_dependencies(&fixture.context(runner)).unwrap();
    assert!(!result.passed());
    assert_eq!(details(&result), "Missing dependencies: ['usbcore']");
}

#[test]
fn test_module_dependencies_command_failure() {
    let fixture = DriverFixture::healthy();
    let runner = MockRunner::new().fail("modinfo", "modinfo: ERROR: Module blue_snowball.ko not found.");
    let result = module::check_module_dependencies(&fixture.context(runner)).unwrap();
    assert!(!result.passed());
    assert!(details(&result).starts_with("Failed to check dependencies: modinfo: ERROR"));
}

// MOD-003

#[test]
fn test_usb_device_table_found() {
    let fixture = DriverFixture::healthy();
    let runner = MockRunner::healthy();
    let result = module::check_usb_device_table(&fixture.context(runner.clone())).unwrap();
    assert!(result.passed());
    assert_eq!(details(&result), "Blue Snowball USB ID found in module");
    assert_eq!(runner.calls(), vec!["modinfo -F alias blue_snowball.ko"]);
}

#[test]
fn test_usb_device_table_other_device() {
    let fixture = DriverFixture::healthy();
    let runner = MockRunner::healthy().succeed("modinfo -F alias", "usb:v046Dp0A44d*dc*dsc*dp*ic*isc*ip*in*\n");
    let result = module::check_usb_device_table(&fixture.context(runner)).unwrap();
    assert!(!result.passed());
    assert_eq!(details(&result), "Blue Snowball USB ID not found in module");
}

#[test]
fn test_usb_device_table_command_failure() {
    let fixture = DriverFixture::healthy();
    let runner = MockRunner::new().fail("modinfo", "modinfo: not found");
    let result = module::check_usb_device_table(&fixture.context(runner)).unwrap();
    assert!(!result.passed());
    assert_eq!(details(&result), "Blue Snowball USB ID not found in module");
}

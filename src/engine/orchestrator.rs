//! Check execution orchestrator.
//!
//! Manages check registration and strictly sequential execution.
//!
//! # Graceful Degradation
//!
//! This module handles errors gracefully:
//! - Check returns `Err`: Converted to a Fail result carrying the error message
//! - Check panics: Caught via std::panic::catch_unwind, converted to Fail result
//! - Invalid check ID: Silently skipped in run_specific/run_excluding
//! - Empty check list: Returns empty report (not an error)
//!
//! Every selected check runs, in registration order, regardless of how
//! earlier checks ended. No function in this module will panic.

use crate::checks::CheckContext;
use crate::engine::result::{ResultAggregator, ValidationReport};
use crate::platform::linux;
use crate::{Check, CheckCategory, CheckResult, HarnessError};
use log::{debug, error};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

/// Signature shared by every check function
pub type CheckFn = Box<dyn Fn(&CheckContext) -> Result<CheckResult, HarnessError>>;

/// A registered check with its execution function
pub struct RegisteredCheck {
    pub id: String,
    pub name: String,
    pub category: CheckCategory,
    pub description: String,
    pub check_fn: CheckFn,
}

impl RegisteredCheck {
    /// Descriptor without a result, as shown by `list`
    pub fn describe(&self) -> Check {
        Check {
            id: self.id.clone(),
            name: self.name.clone(),
            category: self.category,
            description: self.description.clone(),
            result: None,
        }
    }
}

/// Check orchestrator
pub struct CheckOrchestrator {
    context: CheckContext,
    checks: Vec<RegisteredCheck>,
}

impl CheckOrchestrator {
    /// Create a new orchestrator operating on the given context
    pub fn new(context: CheckContext) -> Self {
        CheckOrchestrator {
            context,
            checks: Vec::new(),
        }
    }

    /// Register checks for execution
    pub fn register_checks(&mut self, checks: Vec<RegisteredCheck>) {
        self.checks.extend(checks);
    }

    /// Register a single check
    pub fn register_check(&mut self, check: RegisteredCheck) {
        self.checks.push(check);
    }

    /// Registered checks, in execution order
    pub fn checks(&self) -> &[RegisteredCheck] {
        &self.checks
    }

    /// Run all registered checks
    pub fn run_all(&self) -> ValidationReport {
        self.run_all_with(&mut |_: &Check| {})
    }

    /// Run all registered checks, reporting each result as it is recorded
    pub fn run_all_with(&self, observer: &mut dyn FnMut(&Check)) -> ValidationReport {
        self.run_selected(|_| true, observer)
    }

    /// Run checks in a specific category
    pub fn run_category(&self, category: CheckCategory) -> ValidationReport {
        self.run_categories(&[category])
    }

    /// Run checks in multiple categories
    pub fn run_categories(&self, categories: &[CheckCategory]) -> ValidationReport {
        self.run_categories_with(categories, &mut |_: &Check| {})
    }

    pub fn run_categories_with(
        &self,
        categories: &[CheckCategory],
        observer: &mut dyn FnMut(&Check),
    ) -> ValidationReport {
        self.run_selected(|c| categories.contains(&c.category), observer)
    }

    /// Run specific checks by ID
    pub fn run_specific(&self, check_ids: &[String]) -> ValidationReport {
        self.run_specific_with(check_ids, &mut |_: &Check| {})
    }

    pub fn run_specific_with(&self, check_ids: &[String], observer: &mut dyn FnMut(&Check)) -> ValidationReport {
        self.run_selected(|c| check_ids.contains(&c.id), observer)
    }

    /// Run all checks except specified IDs
    pub fn run_excluding(&self, skip_ids: &[String]) -> ValidationReport {
        self.run_excluding_with(skip_ids, &mut |_: &Check| {})
    }

    pub fn run_excluding_with(&self, skip_ids: &[String], observer: &mut dyn FnMut(&Check)) -> ValidationReport {
        self.run_selected(|c| !skip_ids.contains(&c.id), observer)
    }

    /// Execute every selected check in registration order
    fn run_selected<P>(&self, selected: P, observer: &mut dyn FnMut(&Check)) -> ValidationReport
    where
        P: Fn(&RegisteredCheck) -> bool,
    {
        let start = Instant::now();
        let mut aggregator = ResultAggregator::new();

        for check in self.checks.iter().filter(|c| selected(c)) {
            let mut recorded = check.describe();
            recorded.result = Some(self.execute_check(check));
            observer(&recorded);
            aggregator.add_result(recorded);
        }

        let total_duration_ms = start.elapsed().as_millis() as u64;
        let hostname = linux::get_hostname().unwrap_or_else(|_| "unknown".to_string());
        let kernel_release = linux::get_kernel_release().ok();

        aggregator.set_metadata(hostname, kernel_release, total_duration_ms);
        aggregator.into_report()
    }

    /// Execute a single check inside a fault boundary
    fn execute_check(&self, check: &RegisteredCheck) -> CheckResult {
        debug!("running {} ({})", check.id, check.name);
        let start = Instant::now();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| (check.check_fn)(&self.context)));
        let elapsed = start.elapsed().as_millis() as u64;

        let result = match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                error!("{} raised an error: {}", check.id, e);
                CheckResult::fail(format!("Check error: {}", e))
            }
            Err(payload) => {
                let message = panic_message(&*payload);
                error!("{} panicked: {}", check.id, message);
                CheckResult::fail(format!("Check panicked: {}", message))
            }
        };

        result.with_duration(elapsed)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Create all registered checks with their execution functions
pub fn create_all_checks() -> Vec<RegisteredCheck> {
    use crate::checks::{build, layout, module, source};

    vec![
        RegisteredCheck {
            id: "LAY-001".to_string(),
            name: "File Structure".to_string(),
            category: CheckCategory::Layout,
            description: "Verify the driver source, Makefile, test script and Dockerfile exist".to_string(),
            check_fn: Box::new(layout::check_file_structure),
        },
        RegisteredCheck {
            id: "BLD-001".to_string(),
            name: "Makefile Targets".to_string(),
            category: CheckCategory::Build,
            description: "Dry-run the clean target of the build-variant makefile".to_string(),
            check_fn: Box::new(build::check_makefile_targets),
        },
        RegisteredCheck {
            id: "SRC-001".to_string(),
            name: "Code Quality".to_string(),
            category: CheckCategory::Source,
            description: "Look for NULL checks, memory cleanup and USB driver registration".to_string(),
            check_fn: Box::new(source::check_code_quality),
        },
        RegisteredCheck {
            id: "SRC-002".to_string(),
            name: "ALSA Integration".to_string(),
            category: CheckCategory::Source,
            description: "Verify sound card and PCM registration calls are present".to_string(),
            check_fn: Box::new(source::check_alsa_integration),
        },
        RegisteredCheck {
            id: "BLD-002".to_string(),
            name: "Module Compilation".to_string(),
            category: CheckCategory::Build,
            description: "Clean and build the module and confirm the .ko artifact exists".to_string(),
            check_fn: Box::new(build::check_module_compilation),
        },
        RegisteredCheck {
            id: "MOD-001".to_string(),
            name: "Module Info".to_string(),
            category: CheckCategory::Module,
            description: "Confirm modinfo can read the built module".to_string(),
            check_fn: Box::new(module::check_module_info),
        },
        RegisteredCheck {
            id: "MOD-002".to_string(),
            name: "Module Dependencies".to_string(),
            category: CheckCategory::Module,
            description: "Verify the module depends on snd, snd_pcm and usbcore".to_string(),
            check_fn: Box::new(module::check_module_dependencies),
        },
        RegisteredCheck {
            id: "MOD-003".to_string(),
            name: "USB Device Table".to_string(),
            category: CheckCategory::Module,
            description: "Verify the module alias matches USB ID 0d8c:0013".to_string(),
            check_fn: Box::new(module::check_usb_device_table),
        },
    ]
}

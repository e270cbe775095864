//! snowball-check CLI entry point
//!
//! Build and source validation for the Blue Snowball USB audio driver.

use clap::Parser;
use log::info;
use snowball_check::cli::args::{Args, Command, OutputFormat};
use snowball_check::cli::output::{banner, get_formatter, progress_line};
use snowball_check::engine::orchestrator::create_all_checks;
use snowball_check::platform::command::ShellRunner;
use snowball_check::platform::linux;
use snowball_check::version::get_build_info;
use snowball_check::{run_checks_with, HarnessConfig};

use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    match args.command() {
        Command::Version => {
            println!("{}", get_build_info());
            ExitCode::SUCCESS
        }
        Command::List => {
            print_check_list();
            ExitCode::SUCCESS
        }
        Command::Check => run_checks(&args),
    }
}

fn print_check_list() {
    println!("Available checks (in execution order):");
    println!();
    for check in create_all_checks() {
        println!(
            "  {:<8} {:<8} {:<20} {}",
            check.id,
            check.category.to_string(),
            check.name,
            check.description
        );
    }
}

fn run_checks(args: &Args) -> ExitCode {
    let text = args.format == OutputFormat::Text;
    let color = !args.no_color;

    if !linux::is_root() {
        if text {
            println!("Warning: Some tests may require root privileges");
        } else {
            log::warn!("Some tests may require root privileges");
        }
    }

    if text {
        println!("{}", banner());
    }

    let config = HarnessConfig::from_args(args);
    let report = match run_checks_with(config, Box::new(ShellRunner), |check| {
        if text {
            if !(args.quiet && check.passed()) {
                println!("{}", progress_line(check, color));
            }
        } else {
            info!("{}", progress_line(check, false));
        }
    }) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error running checks: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let formatter = get_formatter(args.format, args.no_color, args.verbose, args.quiet);
    println!("{}", formatter.format(&report));

    if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user
//! interaction. Functions here are pure (no I/O side effects beyond
//! printing) and testable.

use crate::executor::ExecutionReport;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message);
}

/// Format and print a warning message.
pub fn display_warning(message: &str) {
    eprintln!("\x1b[33m⚠ WARNING:\x1b[0m {}", message);
}

/// Display the proposed version change for a module.
pub fn display_proposed_bump(module: &str, previous: &str, next: &str) {
    println!("\n\x1b[1m{}\x1b[0m", module);
    println!("  From: \x1b[31m{}\x1b[0m", previous);
    println!("  To:   \x1b[32m{}\x1b[0m", next);
}

/// Display the discovered module list with current versions.
pub fn display_modules(modules: &[crate::domain::Module]) {
    println!("\x1b[1mDiscovered modules:\x1b[0m");
    for module in modules {
        println!("  - {} ({})", module.label(), module.current_version);
    }
}

/// Display an execution report: per-module outcome, then a summary line.
///
/// Failures always enumerate every failing module's message, never just
/// the first.
pub fn display_report(report: &ExecutionReport) {
    for result in &report.results {
        match (result.success, &result.new_version) {
            (true, Some(version)) => {
                display_success(&format!("{}: bumped to {}", result.module.label(), version));
            }
            _ => {
                let message = result.error.as_deref().unwrap_or("unknown error");
                display_error(&format!("{}: {}", result.module.label(), message));
            }
        }

        for warning in &result.warnings {
            display_warning(&format!(
                "{}: {} failed: {}",
                result.module.label(),
                warning.action,
                warning.message
            ));
        }
    }

    let failed = report.failed_count();
    if failed == 0 {
        if report.results.len() > 1 {
            println!(
                "\n\x1b[32m✓\x1b[0m All {} modules bumped successfully",
                report.results.len()
            );
        }
    } else {
        eprintln!(
            "\n\x1b[31m✗\x1b[0m {} of {} module(s) failed{}",
            failed,
            report.results.len(),
            if report.skipped > 0 {
                format!(", {} skipped", report.skipped)
            } else {
                String::new()
            }
        );
    }
}

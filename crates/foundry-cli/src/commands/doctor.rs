//! Doctor command: diagnose and optionally repair

use colored::Colorize;
use foundry_core::{Doctor, Report, Severity};

use crate::context::Context;
use crate::error::Result;
use crate::interactive::confirm;

/// Run the doctor command
pub fn run_doctor(ctx: &Context, fix: bool, yes: bool, json: bool) -> Result<()> {
    let store = ctx.store();
    let doctor = Doctor::new(&ctx.locations, &store)
        .with_size_threshold(ctx.settings.size_threshold_bytes());

    let report = doctor.run();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} Running health checks...", "=>".blue().bold());
    print_report(&report);

    let fixable = report.fixable().count();
    if fixable == 0 {
        if !report.is_healthy() {
            println!("No issues can be fixed automatically.");
        }
        return Ok(());
    }

    if !fix {
        println!("Run {} to fix {} issue(s).", "ccf doctor --fix".cyan(), fixable);
        return Ok(());
    }

    if !confirm(&format!("Fix {} issue(s)?", fixable), yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    let summary = doctor.repair(&report);
    for failure in &summary.failures {
        println!(
            "   {} Failed to fix: {} ({})",
            "x".red(),
            failure.description,
            failure.message
        );
    }
    println!(
        "{} Fixed {}, failed {}.",
        "OK".green().bold(),
        summary.fixed,
        summary.failed
    );
    Ok(())
}

fn print_report(report: &Report) {
    for issue in &report.issues {
        let icon = match issue.severity {
            Severity::Error => "x".red().bold(),
            Severity::Warning => "!".yellow().bold(),
        };
        let fixable = if issue.is_fixable() {
            " (fixable)".dimmed().to_string()
        } else {
            String::new()
        };
        println!("   {} [{}] {}{}", icon, issue.category, issue.description, fixable);
    }
    if !report.issues.is_empty() {
        println!();
    }

    println!(
        "Checked {} tracked file(s): {} error(s), {} warning(s)",
        report.files_checked, report.errors, report.warnings
    );
    println!(
        "  missing: {}, modified: {}, orphaned: {}",
        report.missing, report.modified, report.orphaned
    );

    if report.is_healthy() {
        println!("{} No issues found.", "OK".green().bold());
    }
}

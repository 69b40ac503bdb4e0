//! Show command: install roots and installed summary

use colored::Colorize;
use foundry_core::{InstallScope, LocationSummary};

use super::plural;
use crate::context::Context;
use crate::error::Result;

/// Run the show command
pub fn run_show(ctx: &Context) -> Result<()> {
    println!("{}", "Claude Code Directory Structure".bold());
    println!();

    for (scope, root) in ctx.locations.roots() {
        let label = match scope {
            InstallScope::User => "User-level",
            InstallScope::Project => "Project-level",
        };
        let summary = LocationSummary::scan(&root);
        println!("{} ({}):", label.cyan().bold(), summary.root);

        if !summary.exists {
            println!("  {} Directory does not exist", "x".red());
            println!();
            continue;
        }

        for count in &summary.types {
            let dir = count.kind.dir_name();
            if let Some(error) = &count.error {
                println!("  {}/  (error reading: {})", dir, error);
            } else if count.count == 0 {
                println!("  {}/  {}", dir, "(empty)".dimmed());
            } else {
                let noun = if count.kind.is_directory_per_item() { "skill" } else { "file" };
                println!("  {}/  ({} {}{})", dir, count.count, noun, plural(count.count));
            }
        }
        println!();
    }

    println!("{}", "Installed Files (managed by ccf)".bold());
    println!();

    let state = ctx.store().load()?;
    let installed = state.summary();
    if installed.is_empty() {
        println!("  No files installed yet");
        return Ok(());
    }

    for (category, types) in &installed.categories {
        let parts: Vec<String> = types
            .iter()
            .map(|(kind, n)| format!("{} {}{}", n, kind.label(), plural(*n)))
            .collect();
        println!("  {}: {}", category.cyan(), parts.join(", "));
    }
    println!();
    println!(
        "  Total: {} file{} installed",
        installed.total,
        plural(installed.total)
    );
    Ok(())
}

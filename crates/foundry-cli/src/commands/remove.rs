//! Remove command

use colored::Colorize;
use foundry_core::{Installer, RecordFilter, RemoveMode};

use super::plural;
use crate::cli::ScopeArgs;
use crate::context::{self, Context};
use crate::error::Result;
use crate::interactive::confirm;

/// Run the remove command
///
/// Without a category every tracked item goes, and failed deletes do not
/// stop the rest. A scope flag limits removal to that root.
pub fn run_remove(
    ctx: &Context,
    category: Option<&str>,
    kind: Option<&str>,
    scope: &ScopeArgs,
    yes: bool,
) -> Result<()> {
    let (_, kind) = context::selection(category, kind)?;
    let filter = RecordFilter {
        category: category.map(str::to_string),
        kind,
        root: context::explicit_scope(scope).map(|s| ctx.locations.root(s)),
    };
    let mode = if category.is_none() {
        RemoveMode::BestEffort
    } else {
        RemoveMode::FailFast
    };

    let store = ctx.store();
    let mut state = store.load()?;
    let records = filter.select(&state);

    if records.is_empty() {
        println!("{} Nothing installed matches.", "OK".green().bold());
        return Ok(());
    }

    println!("{} Will remove:", "=>".blue().bold());
    for record in &records {
        println!(
            "   {} {} ({})",
            "-".red(),
            record.installed_path,
            record.category.dimmed()
        );
    }
    println!();

    let prompt = format!("Remove {} item{}?", records.len(), plural(records.len()));
    if !confirm(&prompt, yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    let report = Installer::new(&store).remove(&records, &mut state, mode)?;

    println!(
        "{} Removed {} item{}.",
        "OK".green().bold(),
        report.deregistered(),
        plural(report.deregistered())
    );
    if !report.failures.is_empty() {
        println!("{} Could not delete:", "WARN".yellow().bold());
        for failure in &report.failures {
            println!("   {} {}: {}", "!".yellow(), failure.path, failure.message);
        }
    }
    Ok(())
}

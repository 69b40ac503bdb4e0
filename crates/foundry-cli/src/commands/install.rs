//! Install command: preview the plan, confirm, apply

use colored::Colorize;
use foundry_core::{Change, ChangeAction, InstallOptions, Installer, Plan, SkipReason};

use super::plural;
use crate::cli::ScopeArgs;
use crate::context::{self, Context};
use crate::error::Result;
use crate::interactive::confirm;

/// Parsed `install` arguments
#[derive(Debug, Clone, Default)]
pub struct InstallArgs {
    pub category: Option<String>,
    pub kind: Option<String>,
    pub scope: ScopeArgs,
    pub force: bool,
    pub dry_run: bool,
    pub yes: bool,
}

/// Run the install command
pub fn run_install(ctx: &Context, args: &InstallArgs) -> Result<()> {
    let (selection, _) = context::selection(args.category.as_deref(), args.kind.as_deref())?;
    let catalog = ctx.catalog()?;
    let scope = ctx.scope(&args.scope);
    let root = ctx.locations.root(scope);
    let store = ctx.store();
    let installer = Installer::new(&store);
    let options = InstallOptions { force: args.force };

    println!(
        "{} Planning install of {} into {} ({})",
        "=>".blue().bold(),
        selection,
        root,
        scope
    );

    let plan = installer.preview(&catalog, &selection, &root, &options)?;
    print_plan(&plan);

    if plan.is_noop() {
        println!(
            "{} Everything is up to date. Nothing to install.",
            "OK".green().bold()
        );
        return Ok(());
    }

    if args.dry_run {
        println!("{} Dry run: no changes made.", "DRY RUN".yellow().bold());
        return Ok(());
    }

    let pending = plan.pending().count();
    let prompt = format!("Write {} file{} into {}?", pending, plural(pending), root);
    if !confirm(&prompt, args.yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    let mut state = store.load()?;
    let report = installer.apply(&plan, &mut state)?;

    println!(
        "{} Installed {}, updated {}, skipped {}.",
        "OK".green().bold(),
        report.installed.len(),
        report.updated.len(),
        report.skipped
    );
    if !report.preserved.is_empty() {
        println!(
            "{} {} locally modified file{} kept; rerun with --force to overwrite.",
            "NOTE".yellow().bold(),
            report.preserved.len(),
            plural(report.preserved.len())
        );
    }
    Ok(())
}

fn print_plan(plan: &Plan) {
    for change in plan.changes() {
        println!("   {}", describe(change));
    }
    let counts = plan.counts();
    println!(
        "   {} to install, {} to update, {} to skip",
        counts.install, counts.update, counts.skip
    );
    println!();
}

fn describe(change: &Change) -> String {
    let name = format!("{} {}", change.type_label(), change.display_name);
    match (change.action, change.skip_reason) {
        (ChangeAction::Install, _) => format!("{} {}", "+".green(), name),
        (ChangeAction::Update, _) => format!("{} {} (update)", "~".yellow(), name),
        (ChangeAction::Skip, Some(SkipReason::LocallyModified)) => {
            format!("{} {} (modified locally, kept)", "!".red(), name)
        }
        (ChangeAction::Skip, _) => format!("{} {}", "=".dimmed(), name.dimmed()),
    }
}

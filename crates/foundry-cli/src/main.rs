//! CC Foundry CLI
//!
//! Installs catalog content into Claude Code's configuration directories.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::InstallArgs;
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        println!("{} CC Foundry CLI", "ccf".green().bold());
        println!();
        println!("Run {} for available commands.", "ccf --help".cyan());
        return Ok(());
    };

    let ctx = Context::detect(cli.catalog)?;
    execute_command(&ctx, command)
}

/// `RUST_LOG` decides, defaulting to warnings; `--verbose` forces debug.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
    if verbose {
        tracing::debug!("Verbose mode enabled");
    }
}

fn execute_command(ctx: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::List { category } => commands::run_list(ctx, category.as_deref()),
        Commands::Show => commands::run_show(ctx),
        Commands::Install {
            category,
            kind,
            scope,
            force,
            dry_run,
            yes,
        } => commands::run_install(
            ctx,
            &InstallArgs {
                category,
                kind,
                scope,
                force,
                dry_run,
                yes,
            },
        ),
        Commands::Remove {
            category,
            kind,
            scope,
            yes,
        } => commands::run_remove(ctx, category.as_deref(), kind.as_deref(), &scope, yes),
        Commands::Doctor { fix, yes, json } => commands::run_doctor(ctx, fix, yes, json),
    }
}

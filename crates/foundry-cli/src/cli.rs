//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// CC Foundry - Install and maintain Claude Code commands, agents and skills
#[derive(Parser, Debug)]
#[command(name = "ccf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Catalog bundle directory (contains `categories/`)
    #[arg(long, global = true, env = "CCF_CATALOG_DIR", value_name = "DIR")]
    pub catalog: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Which install root to act on
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeArgs {
    /// Use the project root (./.claude)
    #[arg(long, conflicts_with = "user")]
    pub project: bool,

    /// Use the user root (~/.claude)
    #[arg(long)]
    pub user: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List catalog contents and what is installed
    List {
        /// Only show this category
        category: Option<String>,
    },

    /// Show both install roots and a summary of installed items
    Show,

    /// Install catalog items
    ///
    /// Examples:
    ///   ccf install                        # Everything, into ~/.claude
    ///   ccf install development            # One category
    ///   ccf install development -t skills  # One type of one category
    ///   ccf install testing --project      # Into ./.claude
    Install {
        /// Category to install (all categories if omitted)
        category: Option<String>,

        /// Only this content type (commands, agents or skills)
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        kind: Option<String>,

        #[command(flatten)]
        scope: ScopeArgs,

        /// Overwrite files that were edited locally
        #[arg(long)]
        force: bool,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Remove installed items
    ///
    /// Without a category, removes everything this tool installed.
    Remove {
        /// Category to remove (everything if omitted)
        category: Option<String>,

        /// Only this content type (commands, agents or skills)
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        kind: Option<String>,

        #[command(flatten)]
        scope: ScopeArgs,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Check installed files and configuration health
    Doctor {
        /// Apply automatic fixes
        #[arg(long)]
        fix: bool,

        /// Do not ask for confirmation before fixing
        #[arg(short, long)]
        yes: bool,

        /// Output the report as JSON
        #[arg(long, conflicts_with = "fix")]
        json: bool,
    },
}

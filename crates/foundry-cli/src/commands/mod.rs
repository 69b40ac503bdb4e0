//! Command implementations for foundry-cli

pub mod doctor;
pub mod install;
pub mod list;
pub mod remove;
pub mod show;

pub use doctor::run_doctor;
pub use install::{InstallArgs, run_install};
pub use list::run_list;
pub use remove::run_remove;
pub use show::run_show;

/// "s" unless `count` is one
pub(crate) fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

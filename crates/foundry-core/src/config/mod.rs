//! Configuration and location resolution
//!
//! - **Locations**: every path that depends on the machine (home and
//!   project directories, install roots, state document, external config)
//! - **Settings**: optional user settings from
//!   `<config_dir>/cc-foundry/config.toml`
//!
//! Neither can change placement rules or the naming convention.

mod locations;
mod settings;

pub use locations::{InstallScope, Locations};
pub use settings::{DEFAULT_SIZE_WARNING_MB, Settings};

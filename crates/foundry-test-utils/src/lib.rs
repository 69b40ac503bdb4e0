//! Shared test utilities for the CC Foundry workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`env`]: [`TestEnv`], a throwaway home and project directory pair
//! - [`catalog`]: small catalogs in memory and on disk

pub mod catalog;
pub mod env;

pub use catalog::{sample_catalog, write_catalog_dir};
pub use env::TestEnv;

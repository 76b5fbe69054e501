//! relnotes Core - Core library for changelog and release-note generation
//!
//! This crate provides the error taxonomy, configuration loading, and the
//! lenient version parser shared by the relnotes crates.

pub mod config;
pub mod error;
pub mod version;

pub use config::Config;
pub use error::{ConfigError, RelnotesError, Result, VersionError};
pub use version::{max_version, Version};

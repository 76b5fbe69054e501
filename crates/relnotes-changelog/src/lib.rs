//! relnotes Changelog - Report generation from tracker issues
//!
//! This crate classifies issues into changelog sections, cleans their text
//! for plain-text and markdown output, and writes every line to an aggregate
//! file plus one file per project.

pub mod classify;
pub mod clean;
pub mod error;
pub mod formatter;
pub mod outputs;

pub use classify::{Buckets, Category};
pub use error::{ChangelogError, Result};
pub use formatter::{ChangesFormatter, ReleaseNotesFormatter, ReportFormatter, ReportSummary};
pub use outputs::{render_template, Outputs, Params};

#[cfg(test)]
pub(crate) mod test_support;

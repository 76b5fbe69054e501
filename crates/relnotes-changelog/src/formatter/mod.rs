//! Report formatters

mod changes;
mod release_notes;

pub use changes::ChangesFormatter;
pub use release_notes::ReleaseNotesFormatter;

use relnotes_jira::Issue;
use serde::Serialize;

use crate::error::Result;
use crate::outputs::Outputs;

/// What a formatter wrote
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    /// Issues handed to the formatter
    pub issues: usize,
    /// Entries written
    pub entries: usize,
    /// Incompatible changes written without a release note
    pub missing_release_notes: usize,
}

/// Trait for report formatters
pub trait ReportFormatter {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Write a complete report for `issues` to `outputs`
    fn write_report(&self, issues: Vec<Issue>, outputs: &mut Outputs) -> Result<ReportSummary>;
}

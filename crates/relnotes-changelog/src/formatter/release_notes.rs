//! Markdown release notes formatter

use relnotes_jira::{sort_issues, Issue};
use tracing::{debug, instrument, warn};

use super::{ReportFormatter, ReportSummary};
use crate::clean::{light_clean, strict_clean};
use crate::error::Result;
use crate::outputs::Outputs;

const MISSING_NOTE_WARNING: &str =
    "\n**WARNING: No release note provided for this incompatible change.**\n\n";

/// Markdown release notes listing every issue with a release note, plus a
/// warning entry for incompatible changes that lack one.
///
/// Expects `{ver}` and `{previous_ver}` output parameters.
pub struct ReleaseNotesFormatter {
    product: String,
    browse_prefix: String,
}

impl ReleaseNotesFormatter {
    /// Create a formatter. Issue links are `browse_prefix` followed by the
    /// issue key.
    pub fn new(product: impl Into<String>, browse_prefix: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            browse_prefix: browse_prefix.into(),
        }
    }

    fn header(&self) -> String {
        format!(
            "# {product} {{key}} {{ver}} Release Notes\n\n\
             These release notes cover  new developer and user-facing incompatibilities, features, and major improvements.\n\n\
             ## Changes since {product} {{previous_ver}}\n\n",
            product = self.product
        )
    }

    fn entry_line(&self, issue: &Issue) -> String {
        let id = strict_clean(issue.id());
        format!(
            "* [{}]({}{}) | *{}* | **{}**\n",
            id,
            self.browse_prefix,
            id,
            strict_clean(issue.priority()),
            strict_clean(issue.summary())
        )
    }
}

impl ReportFormatter for ReleaseNotesFormatter {
    fn name(&self) -> &'static str {
        "release-notes"
    }

    #[instrument(skip(self, issues, outputs), fields(issue_count = issues.len()))]
    fn write_report(&self, mut issues: Vec<Issue>, outputs: &mut Outputs) -> Result<ReportSummary> {
        sort_issues(&mut issues);
        let mut summary = ReportSummary {
            issues: issues.len(),
            ..Default::default()
        };

        outputs.write_all(&self.header())?;

        for issue in &issues {
            let project = issue.project();
            let note = issue.release_note();

            if issue.is_incompatible() && note.is_empty() {
                warn!(issue = issue.id(), "incompatible change has no release note");
                outputs.write_key_raw(project, "---\n\n")?;
                outputs.write_key_raw(project, &self.entry_line(issue))?;
                outputs.write_key_raw(project, MISSING_NOTE_WARNING)?;
                summary.entries += 1;
                summary.missing_release_notes += 1;
            }

            if !note.is_empty() {
                outputs.write_key_raw(project, "---\n\n")?;
                outputs.write_key_raw(project, &self.entry_line(issue))?;
                outputs.write_key_raw(project, &format!("\n{}\n\n", light_clean(note)))?;
                summary.entries += 1;
            }
        }

        outputs.write_all("\n\n")?;
        debug!(
            entries = summary.entries,
            missing = summary.missing_release_notes,
            "release notes written"
        );
        Ok(summary)
    }
}

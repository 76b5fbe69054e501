//! Plain-text changelog formatter

use relnotes_jira::Issue;
use tracing::{debug, instrument};

use super::{ReportFormatter, ReportSummary};
use crate::classify::{Buckets, CHANGES_SECTIONS};
use crate::clean::changes_clean;
use crate::error::Result;
use crate::outputs::Outputs;

/// Changelog grouped into incompatible changes, features, improvements,
/// bug fixes and everything else.
///
/// Expects `{ver}` and `{date}` output parameters. Sub-tasks are classified
/// but not listed in any section.
pub struct ChangesFormatter {
    product: String,
}

impl ChangesFormatter {
    /// Create a formatter for the named product
    pub fn new(product: impl Into<String>) -> Self {
        Self {
            product: product.into(),
        }
    }

    fn header(&self) -> String {
        format!(
            "{} Changelog\n\n  Release {{ver}} - {{date}}\n\n",
            self.product
        )
    }

    fn write_list(&self, issues: &[Issue], outputs: &mut Outputs) -> Result<usize> {
        for issue in issues {
            let line = format!(
                "     {}. {} ({}) \n\n",
                issue.id(),
                changes_clean(issue.summary()),
                changes_clean(issue.assignee())
            );
            outputs.write_key_raw(issue.project(), &line)?;
        }
        Ok(issues.len())
    }
}

impl Default for ChangesFormatter {
    fn default() -> Self {
        Self::new("Hadoop")
    }
}

impl ReportFormatter for ChangesFormatter {
    fn name(&self) -> &'static str {
        "changes"
    }

    #[instrument(skip(self, issues, outputs), fields(issue_count = issues.len()))]
    fn write_report(&self, issues: Vec<Issue>, outputs: &mut Outputs) -> Result<ReportSummary> {
        let buckets = Buckets::from_issues(issues);
        let mut summary = ReportSummary {
            issues: buckets.len(),
            ..Default::default()
        };

        outputs.write_all(&self.header())?;

        for (title, categories) in CHANGES_SECTIONS {
            outputs.write_all(&format!("{}:\n\n", title))?;
            for category in categories.iter() {
                summary.entries += self.write_list(buckets.get(*category), outputs)?;
            }
        }

        outputs.write_all("\n\n")?;
        debug!(entries = summary.entries, "changelog written");
        Ok(summary)
    }
}

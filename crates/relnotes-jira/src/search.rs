//! Search queries and result pages

use std::sync::Arc;

use serde::Deserialize;

use crate::error::Result;
use crate::fields::IssueSchema;
use crate::issue::{Issue, RawIssue};

/// Filter for issues fixed in a set of versions
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// Project keys to search
    pub projects: Vec<String>,
    /// Fix versions to match
    pub fix_versions: Vec<String>,
    /// Required resolution
    pub resolution: String,
}

impl SearchQuery {
    /// Create a query for issues resolved as "Fixed"
    pub fn new(projects: Vec<String>, fix_versions: Vec<String>) -> Self {
        Self {
            projects,
            fix_versions,
            resolution: "Fixed".to_string(),
        }
    }

    /// Set the required resolution
    pub fn with_resolution(mut self, resolution: impl Into<String>) -> Self {
        self.resolution = resolution.into();
        self
    }

    /// Render the query as JQL
    pub fn to_jql(&self) -> String {
        let versions: Vec<String> = self
            .fix_versions
            .iter()
            .map(|v| v.replace('\'', "\\'"))
            .collect();

        format!(
            "project in ({}) and fixVersion in ('{}') and resolution = {}",
            self.projects.join(","),
            versions.join("' , '"),
            self.resolution
        )
    }
}

/// One page of `/rest/api/2/search` results
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchPage {
    /// Offset of the first issue in this page
    pub start_at: u64,
    /// Page size the server applied
    pub max_results: u64,
    /// Total number of matching issues
    pub total: u64,
    /// Issues in this page
    pub issues: Vec<RawIssue>,
    /// Present only when the search failed
    pub error_messages: Option<Vec<String>>,
}

impl SearchPage {
    /// Offset the next page starts at
    pub fn next_start(&self) -> u64 {
        self.start_at + self.max_results
    }
}

/// Single-pass iterator over fetched issues.
///
/// Raw records are buffered in memory; each call to `next` builds one
/// [`Issue`] from the next record.
#[derive(Debug)]
pub struct IssueIter {
    records: std::vec::IntoIter<RawIssue>,
    schema: Arc<IssueSchema>,
}

impl IssueIter {
    /// Wrap buffered records
    pub fn new(records: Vec<RawIssue>, schema: Arc<IssueSchema>) -> Self {
        Self {
            records: records.into_iter(),
            schema,
        }
    }
}

impl Iterator for IssueIter {
    type Item = Result<Issue>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records
            .next()
            .map(|raw| Issue::from_raw(raw, &self.schema))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl ExactSizeIterator for IssueIter {}

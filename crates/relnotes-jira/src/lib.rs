//! relnotes JIRA - Issue tracker access for release documentation
//!
//! This crate resolves custom field names to field ids, pages through the
//! search endpoint, and turns raw issue records into [`Issue`] values.

pub mod client;
pub mod error;
pub mod fields;
pub mod issue;
pub mod search;

pub use client::JiraClient;
pub use error::{JiraError, Result};
pub use fields::{FieldIdMap, IssueSchema};
pub use issue::{sort_issues, Issue, RawIssue};
pub use search::{IssueIter, SearchPage, SearchQuery};

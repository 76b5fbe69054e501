//! Issue classification

use std::collections::BTreeMap;
use std::fmt;

use relnotes_jira::{sort_issues, Issue};
use tracing::debug;

/// Changelog bucket an issue belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Flagged as an incompatible change, whatever its type
    Incompatible,
    /// Bug
    Bug,
    /// Improvement
    Improvement,
    /// New Feature
    NewFeature,
    /// Sub-task
    Subtask,
    /// Task
    Task,
    /// Test
    Test,
    /// Any other issue type
    Other,
}

impl Category {
    /// Classify an issue. The incompatible flag wins over the issue type.
    pub fn classify(issue: &Issue) -> Self {
        if issue.is_incompatible() {
            return Self::Incompatible;
        }
        Self::from_issue_type(issue.issue_type())
    }

    /// Bucket for a tracker issue type name
    pub fn from_issue_type(issue_type: &str) -> Self {
        match issue_type {
            "Bug" => Self::Bug,
            "Improvement" => Self::Improvement,
            "New Feature" => Self::NewFeature,
            "Sub-task" => Self::Subtask,
            "Task" => Self::Task,
            "Test" => Self::Test,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Incompatible => "incompatible",
            Self::Bug => "bug",
            Self::Improvement => "improvement",
            Self::NewFeature => "new feature",
            Self::Subtask => "subtask",
            Self::Task => "task",
            Self::Test => "test",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// Changelog sections in output order, each listing the buckets it prints
pub const CHANGES_SECTIONS: &[(&str, &[Category])] = &[
    ("INCOMPATIBLE CHANGES", &[Category::Incompatible]),
    ("NEW FEATURES", &[Category::NewFeature]),
    ("IMPROVEMENTS", &[Category::Improvement]),
    ("BUG FIXES", &[Category::Bug]),
    ("OTHER", &[Category::Other, Category::Test, Category::Task]),
];

/// Issues partitioned by [`Category`], each bucket sorted by issue key
#[derive(Debug, Default)]
pub struct Buckets {
    buckets: BTreeMap<Category, Vec<Issue>>,
}

impl Buckets {
    /// Partition issues; every issue lands in exactly one bucket
    pub fn from_issues(issues: impl IntoIterator<Item = Issue>) -> Self {
        let mut buckets: BTreeMap<Category, Vec<Issue>> = BTreeMap::new();
        for issue in issues {
            buckets
                .entry(Category::classify(&issue))
                .or_default()
                .push(issue);
        }
        for list in buckets.values_mut() {
            sort_issues(list);
        }

        debug!(
            buckets = ?buckets.iter().map(|(c, l)| (c.to_string(), l.len())).collect::<Vec<_>>(),
            "issues classified"
        );
        Self { buckets }
    }

    /// Sorted issues in one bucket
    pub fn get(&self, category: Category) -> &[Issue] {
        self.buckets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of issues across all buckets
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Whether no issues were classified
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! Issue records

use std::cmp::Ordering;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{JiraError, Result};
use crate::fields::IssueSchema;

/// Issue record exactly as returned by the search endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RawIssue {
    /// Project-prefixed key, e.g. `HDFS-1234`
    pub key: String,
    /// Field id to value
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// A resolved issue with every derived value computed up front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    id: String,
    summary: String,
    description: String,
    priority: String,
    assignee: String,
    reporter: String,
    project: String,
    issue_type: String,
    components: Vec<String>,
    incompatible: bool,
    reviewed: bool,
    release_note: String,
}

impl Issue {
    /// Build an issue from a raw record.
    ///
    /// Standard fields must be present (their values may be null); a missing
    /// one is reported as [`JiraError::MissingField`].
    pub fn from_raw(raw: RawIssue, schema: &IssueSchema) -> Result<Self> {
        let reader = FieldReader {
            key: &raw.key,
            fields: &raw.fields,
        };

        let description = reader.text("description")?;
        let release_note = match raw.fields.get(&schema.release_note_field) {
            Some(value) => value_to_string(value),
            None => description.clone(),
        };

        let (incompatible, reviewed) = match raw.fields.get(&schema.flags_field) {
            Some(Value::Array(flags)) => {
                let values: Vec<&str> = flags
                    .iter()
                    .filter_map(|f| f.get("value").and_then(Value::as_str))
                    .collect();
                (
                    values.contains(&schema.incompatible_value.as_str()),
                    values.contains(&schema.reviewed_value.as_str()),
                )
            }
            _ => (false, false),
        };

        Ok(Self {
            summary: reader.text("summary")?,
            priority: reader.nested("priority", "name")?,
            assignee: reader.nested("assignee", "displayName")?,
            reporter: reader.nested("reporter", "displayName")?,
            project: reader.nested("project", "key")?,
            issue_type: reader.nested("issuetype", "name")?,
            components: reader.names("components")?,
            id: raw.key,
            description,
            incompatible,
            reviewed,
            release_note,
        })
    }

    /// Project-prefixed key
    pub fn id(&self) -> &str {
        &self.id
    }

    /// One-line summary
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Full description, empty when unset
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Priority name
    pub fn priority(&self) -> &str {
        &self.priority
    }

    /// Assignee display name
    pub fn assignee(&self) -> &str {
        &self.assignee
    }

    /// Reporter display name
    pub fn reporter(&self) -> &str {
        &self.reporter
    }

    /// Project key from the project field
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Issue type name ("Bug", "Improvement", ...)
    pub fn issue_type(&self) -> &str {
        &self.issue_type
    }

    /// Component names
    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Component names joined the way reports print them
    pub fn components_display(&self) -> String {
        self.components.join(" , ")
    }

    /// Whether the issue is flagged as an incompatible change
    pub fn is_incompatible(&self) -> bool {
        self.incompatible
    }

    /// Whether the issue is flagged as reviewed
    pub fn is_reviewed(&self) -> bool {
        self.reviewed
    }

    /// Release note text, falling back to the description when the tracker
    /// did not return the release note field at all
    pub fn release_note(&self) -> &str {
        &self.release_note
    }

    /// Ordering key: project prefix, then numeric issue number
    pub fn sort_key(&self) -> (&str, u64) {
        match self.id.rsplit_once('-') {
            Some((project, number)) => (project, number.parse().unwrap_or(0)),
            None => (self.id.as_str(), 0),
        }
    }

    /// Compare two issues by [`Issue::sort_key`]
    pub fn cmp_key(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// Sort issues by project, then issue number
pub fn sort_issues(issues: &mut [Issue]) {
    issues.sort_by(Issue::cmp_key);
}

struct FieldReader<'a> {
    key: &'a str,
    fields: &'a Map<String, Value>,
}

impl FieldReader<'_> {
    fn missing(&self, field: &str) -> JiraError {
        JiraError::MissingField {
            issue: self.key.to_string(),
            field: field.to_string(),
        }
    }

    fn field(&self, name: &str) -> Result<&Value> {
        self.fields.get(name).ok_or_else(|| self.missing(name))
    }

    fn text(&self, name: &str) -> Result<String> {
        Ok(value_to_string(self.field(name)?))
    }

    /// `fields[name][attr]`, empty when `fields[name]` is null
    fn nested(&self, name: &str, attr: &str) -> Result<String> {
        match self.field(name)? {
            Value::Null => Ok(String::new()),
            value => value
                .get(attr)
                .map(value_to_string)
                .ok_or_else(|| self.missing(&format!("{}.{}", name, attr))),
        }
    }

    fn names(&self, name: &str) -> Result<Vec<String>> {
        match self.field(name)? {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.get("name")
                        .map(value_to_string)
                        .ok_or_else(|| self.missing(&format!("{}.name", name)))
                })
                .collect(),
            _ => Err(self.missing(name)),
        }
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

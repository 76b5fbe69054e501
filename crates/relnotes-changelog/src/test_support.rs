//! Synthetic issues for unit tests

use relnotes_jira::{Issue, IssueSchema, RawIssue};
use serde_json::{json, Value};

pub(crate) fn schema() -> IssueSchema {
    IssueSchema::new("cf_note", "cf_flags", "Incompatible change", "Reviewed")
}

/// Build an issue of the given type. `note` of `None` leaves the release
/// note field out of the record entirely.
pub(crate) fn issue(key: &str, issue_type: &str, incompatible: bool, note: Option<&str>) -> Issue {
    let project = key.split('-').next().unwrap_or(key);
    let flags: Value = if incompatible {
        json!([{"value": "Incompatible change"}])
    } else {
        Value::Null
    };

    let mut fields = json!({
        "summary": format!("Summary of {}", key),
        "description": "",
        "priority": {"name": "Major"},
        "assignee": {"displayName": "Dev One"},
        "reporter": {"displayName": "Reporter"},
        "project": {"key": project},
        "issuetype": {"name": issue_type},
        "components": [],
        "cf_flags": flags,
    });
    if let (Some(note), Value::Object(map)) = (note, &mut fields) {
        map.insert("cf_note".to_string(), Value::String(note.to_string()));
    }

    let raw: RawIssue = serde_json::from_value(json!({"key": key, "fields": fields}))
        .expect("valid raw issue");
    Issue::from_raw(raw, &schema()).expect("valid issue")
}

//! Custom field resolution
//!
//! JIRA addresses custom fields by ids such as `customfield_12310192`; the
//! display names are what humans configure. The map is fetched once per run.

use std::collections::HashMap;

use relnotes_core::Config;
use serde::Deserialize;
use tracing::debug;

use crate::error::{JiraError, Result};

/// One entry of the `/rest/api/2/field` listing
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDescriptor {
    /// Internal field id
    pub id: String,
    /// Display name
    pub name: String,
}

/// Display name to field id mapping
#[derive(Debug, Clone, Default)]
pub struct FieldIdMap {
    ids: HashMap<String, String>,
}

impl FieldIdMap {
    /// Build the map from field descriptors. Later duplicates win.
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        let ids = descriptors.into_iter().map(|d| (d.name, d.id)).collect();
        Self { ids }
    }

    /// Field id for a display name, if the tracker defines it
    pub fn get(&self, name: &str) -> Option<&str> {
        self.ids.get(name).map(String::as_str)
    }

    /// Field id for a display name the run cannot do without
    pub fn require(&self, name: &str) -> Result<&str> {
        self.get(name)
            .ok_or_else(|| JiraError::UnknownField(name.to_string()))
    }

    /// Number of known fields
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no fields are known
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<(String, String)> for FieldIdMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Resolved field ids and flag values used to read issue records
#[derive(Debug, Clone)]
pub struct IssueSchema {
    /// Field id of the release note
    pub release_note_field: String,
    /// Field id of the multi-valued flags field
    pub flags_field: String,
    /// Flag value marking an incompatible change
    pub incompatible_value: String,
    /// Flag value marking a reviewed change
    pub reviewed_value: String,
}

impl IssueSchema {
    /// Create a schema from already-resolved field ids
    pub fn new(
        release_note_field: impl Into<String>,
        flags_field: impl Into<String>,
        incompatible_value: impl Into<String>,
        reviewed_value: impl Into<String>,
    ) -> Self {
        Self {
            release_note_field: release_note_field.into(),
            flags_field: flags_field.into(),
            incompatible_value: incompatible_value.into(),
            reviewed_value: reviewed_value.into(),
        }
    }

    /// Resolve the configured field names, failing on the first unknown one
    pub fn resolve(fields: &FieldIdMap, config: &Config) -> Result<Self> {
        let release_note_field = fields.require(&config.fields.release_note)?;
        let flags_field = fields.require(&config.fields.flags)?;
        debug!(release_note_field, flags_field, "resolved custom field ids");

        Ok(Self::new(
            release_note_field,
            flags_field,
            &config.flags.incompatible,
            &config.flags.reviewed,
        ))
    }
}

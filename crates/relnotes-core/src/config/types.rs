//! Configuration types

use serde::{Deserialize, Deserializer};

/// Main configuration for relnotes
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Product name used in report headers
    pub product: String,

    /// Issue tracker connection settings
    pub tracker: TrackerConfig,

    /// Project keys queried and given their own output file
    pub projects: Vec<String>,

    /// Display names of the custom fields relnotes reads
    pub fields: FieldNamesConfig,

    /// Option values of the flags field
    pub flags: FlagValuesConfig,

    /// Changelog output settings
    #[serde(deserialize_with = "changes_files")]
    pub changes: OutputFilesConfig,

    /// Release notes output settings
    #[serde(deserialize_with = "release_notes_files")]
    pub release_notes: OutputFilesConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            product: "Hadoop".to_string(),
            tracker: TrackerConfig::default(),
            projects: ["HADOOP", "HDFS", "MAPREDUCE", "YARN"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            fields: FieldNamesConfig::default(),
            flags: FlagValuesConfig::default(),
            changes: OutputFilesConfig::changes(),
            release_notes: OutputFilesConfig::release_notes(),
        }
    }
}

/// Issue tracker configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Base URL of the JIRA instance
    pub url: String,

    /// Issues requested per search page
    pub page_size: u32,

    /// Resolution issues must have to be reported
    pub resolution: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            url: "https://issues.apache.org/jira".to_string(),
            page_size: 100,
            resolution: "Fixed".to_string(),
        }
    }
}

/// Field display names, resolved to field ids at runtime
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FieldNamesConfig {
    /// Free-text release note field
    pub release_note: String,

    /// Multi-valued flags field
    pub flags: String,
}

impl Default for FieldNamesConfig {
    fn default() -> Self {
        Self {
            release_note: "Release Note".to_string(),
            flags: "Hadoop Flags".to_string(),
        }
    }
}

/// Values of the flags field that carry meaning
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FlagValuesConfig {
    /// Marks an incompatible change
    pub incompatible: String,

    /// Marks a reviewed change
    pub reviewed: String,
}

impl Default for FlagValuesConfig {
    fn default() -> Self {
        Self {
            incompatible: "Incompatible change".to_string(),
            reviewed: "Reviewed".to_string(),
        }
    }
}

/// File name templates for one report kind
///
/// Templates use `{ver}`, `{key}`, `{date}` and `{previous_ver}` placeholders.
#[derive(Debug, Clone)]
pub struct OutputFilesConfig {
    /// File spanning every project
    pub aggregate_file: String,

    /// File per project, must contain `{key}`
    pub project_file: String,
}

impl OutputFilesConfig {
    /// Default plain-text changelog file names
    pub fn changes() -> Self {
        Self {
            aggregate_file: "CHANGES.{ver}.txt".to_string(),
            project_file: "CHANGES.{key}.{ver}.txt".to_string(),
        }
    }

    /// Default markdown release notes file names
    pub fn release_notes() -> Self {
        Self {
            aggregate_file: "releasenotes.{ver}.md".to_string(),
            project_file: "releasenotes.{key}.{ver}.md".to_string(),
        }
    }

    fn overlay(mut self, partial: Option<PartialOutputFiles>) -> Self {
        if let Some(partial) = partial {
            if let Some(file) = partial.aggregate_file {
                self.aggregate_file = file;
            }
            if let Some(file) = partial.project_file {
                self.project_file = file;
            }
        }
        self
    }
}

/// An output section as written in the file; unset names keep their default
#[derive(Debug, Deserialize)]
struct PartialOutputFiles {
    aggregate_file: Option<String>,
    project_file: Option<String>,
}

fn changes_files<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<OutputFilesConfig, D::Error> {
    let partial = Option::<PartialOutputFiles>::deserialize(deserializer)?;
    Ok(OutputFilesConfig::changes().overlay(partial))
}

fn release_notes_files<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<OutputFilesConfig, D::Error> {
    let partial = Option::<PartialOutputFiles>::deserialize(deserializer)?;
    Ok(OutputFilesConfig::release_notes().overlay(partial))
}

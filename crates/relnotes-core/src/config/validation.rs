//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::{Config, OutputFilesConfig};

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_tracker(config)?;
    validate_projects(config)?;
    validate_fields(config)?;
    validate_output_files("changes", &config.changes)?;
    validate_output_files("release_notes", &config.release_notes)?;
    debug!("configuration validation passed");
    Ok(())
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
}

fn validate_tracker(config: &Config) -> Result<()> {
    match url::Url::parse(&config.tracker.url) {
        Ok(url) if url.cannot_be_a_base() => {
            return Err(invalid("tracker.url", "must be an absolute http(s) URL").into());
        }
        Ok(_) => {}
        Err(e) => return Err(invalid("tracker.url", e.to_string()).into()),
    }

    if config.tracker.page_size == 0 {
        return Err(invalid("tracker.page_size", "must be greater than zero").into());
    }

    if config.tracker.resolution.trim().is_empty() {
        return Err(invalid("tracker.resolution", "resolution cannot be empty").into());
    }

    Ok(())
}

fn validate_projects(config: &Config) -> Result<()> {
    if config.projects.is_empty() {
        return Err(invalid("projects", "at least one project key is required").into());
    }

    for project in &config.projects {
        if project.is_empty() || !project.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid(
                "projects",
                format!("'{}' is not a valid project key", project),
            )
            .into());
        }
    }

    Ok(())
}

fn validate_fields(config: &Config) -> Result<()> {
    if config.fields.release_note.is_empty() {
        return Err(invalid("fields.release_note", "field name cannot be empty").into());
    }
    if config.fields.flags.is_empty() {
        return Err(invalid("fields.flags", "field name cannot be empty").into());
    }
    Ok(())
}

fn validate_output_files(section: &str, files: &OutputFilesConfig) -> Result<()> {
    if !files.aggregate_file.contains("{ver}") {
        return Err(invalid(
            format!("{}.aggregate_file", section),
            "must contain {ver} placeholder",
        )
        .into());
    }

    if !files.project_file.contains("{key}") {
        return Err(invalid(
            format!("{}.project_file", section),
            "must contain {key} placeholder",
        )
        .into());
    }

    if !files.project_file.contains("{ver}") {
        return Err(invalid(
            format!("{}.project_file", section),
            "must contain {ver} placeholder",
        )
        .into());
    }

    Ok(())
}

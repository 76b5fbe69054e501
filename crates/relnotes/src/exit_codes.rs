//! Exit codes for the CLI

use relnotes_changelog::ChangelogError;
use relnotes_core::RelnotesError;
use relnotes_jira::JiraError;

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error (clap also exits with 2 on usage errors)
pub const CONFIG_ERROR: i32 = 2;

/// Issue tracker error
pub const TRACKER_ERROR: i32 = 3;

/// Output file error
pub const OUTPUT_ERROR: i32 = 4;

/// Pick the exit code for a failed run
pub fn for_error(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<JiraError>().is_some() {
        return TRACKER_ERROR;
    }
    if err.downcast_ref::<ChangelogError>().is_some() {
        return OUTPUT_ERROR;
    }
    if let Some(RelnotesError::Config(_)) = err.downcast_ref::<RelnotesError>() {
        return CONFIG_ERROR;
    }
    ERROR
}

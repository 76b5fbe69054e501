//! Release notes command

use clap::Args;
use tracing::{info, warn};

use relnotes_changelog::ReleaseNotesFormatter;
use relnotes_core::Version;
use relnotes_jira::JiraClient;

use super::report::{base_params, fetch_issues, write_report, ReportArgs};
use crate::cli::{output, Cli};

/// Generate markdown release notes
#[derive(Debug, Args)]
pub struct ReleaseNotesCommand {
    #[command(flatten)]
    pub report: ReportArgs,

    /// Previous release named in the header (default: highest version with
    /// its patch number decremented)
    #[arg(long = "previous-ver", alias = "previousVer", value_name = "VERSION")]
    pub previous_ver: Option<String>,
}

impl ReleaseNotesCommand {
    /// Previous version label, guessing it when none was given.
    ///
    /// A guess is always reported on stderr, even with `--quiet`.
    fn previous_version(&self, latest: &Version) -> String {
        if let Some(previous) = &self.previous_ver {
            return previous.clone();
        }

        let guessed = latest.previous_patch().to_string();
        warn!(previous = %guessed, "no previous version given, guessing");
        output::warning(&format!(
            "no previousVersion given, guessing it is {}",
            guessed
        ));
        guessed
    }

    /// Execute the release notes command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(versions = ?self.report.versions, previous = ?self.previous_ver, "executing release notes command");
        let config = cli.load_config()?;
        let version = self.report.max_version()?;
        let previous = self.previous_version(&version);

        let client = JiraClient::from_config(&config)?;
        let issues = fetch_issues(&client, &config, &self.report.versions)?;

        let mut params = base_params(&version);
        params.insert("previous_ver".to_string(), previous);

        let formatter = ReleaseNotesFormatter::new(&config.product, client.browse_url(""));
        write_report(
            cli,
            &formatter,
            &config.release_notes,
            &config,
            &self.report,
            issues,
            params,
        )
    }
}

//! Changes command

use chrono::{Local, NaiveDate};
use clap::Args;
use tracing::info;

use relnotes_changelog::ChangesFormatter;
use relnotes_jira::JiraClient;

use super::report::{base_params, fetch_issues, write_report, ReportArgs};
use crate::cli::Cli;

/// Generate plain-text changelogs
#[derive(Debug, Args)]
pub struct ChangesCommand {
    #[command(flatten)]
    pub report: ReportArgs,

    /// Release date printed in the header (default: today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,
}

impl ChangesCommand {
    /// Execute the changes command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(versions = ?self.report.versions, "executing changes command");
        let config = cli.load_config()?;
        let version = self.report.max_version()?;

        let client = JiraClient::from_config(&config)?;
        let issues = fetch_issues(&client, &config, &self.report.versions)?;

        let date = self.date.unwrap_or_else(|| Local::now().date_naive());
        let mut params = base_params(&version);
        params.insert("date".to_string(), date.format("%Y-%m-%d").to_string());

        let formatter = ChangesFormatter::new(&config.product);
        write_report(
            cli,
            &formatter,
            &config.changes,
            &config,
            &self.report,
            issues,
            params,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Workspace;

    #[test]
    fn test_changes_writes_aggregate_and_project_files() {
        let ws = Workspace::start();
        ws.run(&["changes", "-v", "2.8.0", "--date", "2024-03-01"])
            .unwrap();

        let aggregate = ws.read("CHANGES.2.8.0.txt");
        assert!(aggregate.starts_with("Hadoop Changelog\n\n  Release 2.8.0 - 2024-03-01\n\n"));
        assert!(aggregate.contains("     HADOOP-5. Summary of HADOOP-5 (Dev One) \n\n"));
        assert!(aggregate.contains("     HDFS-100. Summary of HDFS-100 (Dev One) \n\n"));

        let hadoop = ws.read("CHANGES.HADOOP.2.8.0.txt");
        let incompatible = hadoop.find("INCOMPATIBLE CHANGES:").unwrap();
        let entry = hadoop.find("HADOOP-5.").unwrap();
        assert!(entry > incompatible);
        assert!(!hadoop.contains("HDFS-100"));

        let hdfs = ws.read("CHANGES.HDFS.2.8.0.txt");
        assert!(hdfs.contains("HDFS-100."));
        assert!(!hdfs.contains("HADOOP-5"));
    }

    #[test]
    fn test_changes_fails_without_output_dir() {
        let ws = Workspace::start();
        std::fs::remove_dir(ws.out_dir()).unwrap();
        let err = ws.run(&["changes", "-v", "2.8.0"]).unwrap_err();
        assert_eq!(crate::exit_codes::for_error(&err), crate::exit_codes::OUTPUT_ERROR);
    }
}

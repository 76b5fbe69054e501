//! Shared plumbing for the report commands

use std::path::PathBuf;

use clap::Args;
use relnotes_changelog::{Outputs, Params, ReportFormatter, ReportSummary};
use relnotes_core::config::OutputFilesConfig;
use relnotes_core::{max_version, Config, Version};
use relnotes_jira::{Issue, JiraClient};
use tracing::info;

use crate::cli::{output, Cli, OutputFormat};

/// Arguments shared by every report command
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Fix version to include (repeatable)
    #[arg(short = 'v', long = "version", value_name = "VERSION", required = true)]
    pub versions: Vec<String>,

    /// Directory the report files are written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

impl ReportArgs {
    /// Parsed versions, in the order given
    pub fn parsed_versions(&self) -> Vec<Version> {
        self.versions.iter().map(|v| Version::parse(v)).collect()
    }

    /// Highest requested version
    pub fn max_version(&self) -> anyhow::Result<Version> {
        Ok(max_version(&self.parsed_versions())?.clone())
    }
}

/// Fetch every issue fixed in `versions`
pub fn fetch_issues(
    client: &JiraClient,
    config: &Config,
    versions: &[String],
) -> anyhow::Result<Vec<Issue>> {
    let runtime = tokio::runtime::Runtime::new()?;
    let issues = runtime.block_on(client.fetch_fixed_issues(config, versions))?;
    let issues = issues.collect::<relnotes_jira::Result<Vec<_>>>()?;
    info!(issue_count = issues.len(), "issues fetched");
    Ok(issues)
}

/// Open the output files, write the report, and report what was written
pub fn write_report(
    cli: &Cli,
    formatter: &dyn ReportFormatter,
    files: &OutputFilesConfig,
    config: &Config,
    args: &ReportArgs,
    issues: Vec<Issue>,
    params: Params,
) -> anyhow::Result<()> {
    info!(formatter = formatter.name(), dir = %args.output_dir.display(), "writing report");
    let version = params.get("ver").cloned().unwrap_or_default();

    let mut outputs = Outputs::create(
        &args.output_dir,
        &files.aggregate_file,
        &files.project_file,
        &config.projects,
        params,
    )?;
    let summary = formatter.write_report(issues, &mut outputs)?;
    let paths = outputs.close()?;

    print_result(cli, formatter, &version, &summary, &paths)
}

fn print_result(
    cli: &Cli,
    formatter: &dyn ReportFormatter,
    version: &str,
    summary: &ReportSummary,
    paths: &[PathBuf],
) -> anyhow::Result<()> {
    match cli.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "report": formatter.name(),
                "version": version,
                "summary": summary,
                "files": paths,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            if cli.quiet {
                return Ok(());
            }
            output::success(&format!(
                "Wrote {} entries for {} issues to {} files",
                summary.entries,
                summary.issues,
                paths.len()
            ));
            for path in paths {
                output::info(&output::path_style().apply_to(path.display()).to_string());
            }
            if summary.missing_release_notes > 0 {
                output::warning(&format!(
                    "{} incompatible changes have no release note",
                    summary.missing_release_notes
                ));
            }
        }
    }
    Ok(())
}

/// Template parameters every report gets
pub fn base_params(version: &Version) -> Params {
    let mut params = Params::new();
    params.insert("ver".to_string(), version.to_string());
    params
}

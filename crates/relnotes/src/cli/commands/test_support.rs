//! Mock tracker and scratch workspace for command tests

use std::path::PathBuf;

use clap::Parser;
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::cli::Cli;

fn record(key: &str, issue_type: &str, incompatible: bool, note: Value) -> Value {
    let flags = if incompatible {
        json!([{"value": "Incompatible change"}, {"value": "Reviewed"}])
    } else {
        Value::Null
    };
    json!({
        "key": key,
        "fields": {
            "summary": format!("Summary of {}", key),
            "description": "",
            "priority": {"name": "Major"},
            "assignee": {"displayName": "Dev One"},
            "reporter": null,
            "project": {"key": key.split('-').next().unwrap()},
            "issuetype": {"name": issue_type},
            "components": [],
            "customfield_1": note,
            "customfield_2": flags
        }
    })
}

/// A tracker serving two issues fixed in one release, and a directory
/// holding a config that points at it
pub(crate) struct Workspace {
    pub server: MockServer,
    pub dir: TempDir,
    _runtime: Runtime,
}

impl Workspace {
    pub fn start() -> Self {
        let runtime = Runtime::new().unwrap();
        let server = runtime.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/rest/api/2/field"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                    {"id": "customfield_1", "name": "Release Note"},
                    {"id": "customfield_2", "name": "Hadoop Flags"}
                ])))
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(path("/rest/api/2/search"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "startAt": 0,
                    "maxResults": 100,
                    "total": 2,
                    "issues": [
                        record("HDFS-100", "Bug", false, json!("Fixed the_thing")),
                        record("HADOOP-5", "Improvement", true, Value::Null)
                    ]
                })))
                .mount(&server)
                .await;
            server
        });

        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("relnotes.yaml"),
            format!(
                "tracker:\n  url: {}\nprojects: [HADOOP, HDFS]\n",
                server.uri()
            ),
        )
        .unwrap();
        std::fs::create_dir(dir.path().join("out")).unwrap();

        Self {
            server,
            dir,
            _runtime: runtime,
        }
    }

    pub fn out_dir(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    /// Run `relnotes -q -c <config> <args> -o <out>`
    pub fn run(&self, args: &[&str]) -> anyhow::Result<()> {
        let config = self.dir.path().join("relnotes.yaml");
        let out = self.out_dir();

        let mut argv: Vec<String> = vec!["relnotes".into(), "-q".into(), "-c".into()];
        argv.push(config.display().to_string());
        argv.extend(args.iter().map(|a| a.to_string()));
        argv.push("-o".into());
        argv.push(out.display().to_string());

        Cli::try_parse_from(argv)?.execute()
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.out_dir().join(name)).unwrap()
    }
}

//! JIRA REST client
//!
//! Unauthenticated, read-only access to the two endpoints relnotes needs:
//!
//! - `GET rest/api/2/field` for the field name to id mapping
//! - `GET rest/api/2/search` for the paginated issue search
//!
//! Requests are issued one at a time; there is no retry.

use std::sync::Arc;

use relnotes_core::Config;
use reqwest::Client;
use tracing::{debug, info, instrument};
use url::Url;

use crate::error::{JiraError, Result};
use crate::fields::{FieldDescriptor, FieldIdMap, IssueSchema};
use crate::search::{IssueIter, SearchPage, SearchQuery};

const DEFAULT_PAGE_SIZE: u32 = 100;

/// Client for a JIRA instance
pub struct JiraClient {
    base_url: Url,
    page_size: u32,
    client: Client,
}

impl JiraClient {
    /// Create a client for the JIRA instance at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            page_size: DEFAULT_PAGE_SIZE,
            client: Client::new(),
        })
    }

    /// Create a client from the tracker section of the configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(&config.tracker.url)?.with_page_size(config.tracker.page_size))
    }

    /// Set the number of issues requested per page
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Requested page size
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Web link to an issue
    pub fn browse_url(&self, key: &str) -> String {
        format!("{}browse/{}", self.base_url, key)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Fetch every field the tracker defines
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch_field_map(&self) -> Result<FieldIdMap> {
        let url = self.endpoint("rest/api/2/field")?;
        debug!(url = %url, "fetching field definitions");

        let response = self.client.get(url).send().await?.error_for_status()?;
        let descriptors: Vec<FieldDescriptor> = response.json().await?;

        let fields = FieldIdMap::from_descriptors(descriptors);
        info!(field_count = fields.len(), "field definitions loaded");
        Ok(fields)
    }

    /// Fetch one page of search results
    pub async fn search_page(&self, jql: &str, start_at: u64) -> Result<SearchPage> {
        let url = self.endpoint("rest/api/2/search")?;
        let start_at = start_at.to_string();
        let max_results = self.page_size.to_string();

        let response = self
            .client
            .get(url)
            .query(&[
                ("jql", jql),
                ("startAt", start_at.as_str()),
                ("maxResults", max_results.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<SearchPage>(&body) {
            Ok(page) => {
                if let Some(messages) = page.error_messages {
                    return Err(JiraError::Search(messages));
                }
                if !status.is_success() {
                    return Err(JiraError::ApiError {
                        status: status.as_u16(),
                        message: body,
                    });
                }
                Ok(page)
            }
            Err(_) if !status.is_success() => Err(JiraError::ApiError {
                status: status.as_u16(),
                message: body,
            }),
            Err(e) => Err(JiraError::Json(e)),
        }
    }

    /// Fetch every issue matching `query`, one page at a time.
    ///
    /// Paging continues while `startAt + maxResults` of the last page is
    /// below the reported total. Any tracker error aborts the whole fetch.
    #[instrument(skip(self, query, schema), fields(page_size = self.page_size))]
    pub async fn search_all(
        &self,
        query: &SearchQuery,
        schema: Arc<IssueSchema>,
    ) -> Result<IssueIter> {
        let jql = query.to_jql();
        info!(jql = %jql, "searching issues");

        let mut records = Vec::new();
        let mut at: u64 = 0;
        let mut end: u64 = 1;

        while at < end {
            info!(start_at = at, "fetching issues page");
            let page = self.search_page(&jql, at).await?;

            debug!(
                start_at = page.start_at,
                returned = page.issues.len(),
                total = page.total,
                "page received"
            );
            let next = page.next_start();
            end = page.total;
            records.extend(page.issues);

            if next <= at && next < end {
                return Err(JiraError::Stalled {
                    start_at: at,
                    total: end,
                });
            }
            at = next;
        }

        info!(issue_count = records.len(), "search complete");
        Ok(IssueIter::new(records, schema))
    }

    /// Resolve the configured custom fields and fetch every issue fixed in
    /// `versions` across the configured projects
    pub async fn fetch_fixed_issues(
        &self,
        config: &Config,
        versions: &[String],
    ) -> Result<IssueIter> {
        let fields = self.fetch_field_map().await?;
        let schema = Arc::new(IssueSchema::resolve(&fields, config)?);

        let query = SearchQuery::new(config.projects.clone(), versions.to_vec())
            .with_resolution(&config.tracker.resolution);

        self.search_all(&query, schema).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn record(key: &str) -> Value {
        json!({
            "key": key,
            "fields": {
                "summary": format!("summary of {}", key),
                "description": null,
                "priority": {"name": "Major"},
                "assignee": null,
                "reporter": null,
                "project": {"key": key.split('-').next().unwrap()},
                "issuetype": {"name": "Bug"},
                "components": [],
                "customfield_1": null
            }
        })
    }

    fn page(start_at: u64, total: u64, count: u64) -> Value {
        let issues: Vec<Value> = (start_at..start_at + count)
            .map(|n| record(&format!("HDFS-{}", n + 1)))
            .collect();
        json!({
            "startAt": start_at,
            "maxResults": 100,
            "total": total,
            "issues": issues
        })
    }

    async fn mount_fields(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/rest/api/2/field"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "customfield_1", "name": "Release Note"},
                {"id": "customfield_2", "name": "Hadoop Flags"},
                {"id": "summary", "name": "Summary"}
            ])))
            .expect(1)
            .mount(server)
            .await;
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = JiraClient::new("https://issues.apache.org/jira").unwrap();
        assert_eq!(
            client.browse_url("HDFS-1"),
            "https://issues.apache.org/jira/browse/HDFS-1"
        );
        assert_eq!(
            client.endpoint("rest/api/2/field").unwrap().as_str(),
            "https://issues.apache.org/jira/rest/api/2/field"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            JiraClient::new("not a url"),
            Err(JiraError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_field_map() {
        let server = MockServer::start().await;
        mount_fields(&server).await;

        let client = JiraClient::new(&server.uri()).unwrap();
        let fields = client.fetch_field_map().await.unwrap();
        assert_eq!(fields.get("Release Note"), Some("customfield_1"));
        assert_eq!(fields.len(), 3);
    }

    #[tokio::test]
    async fn test_pagination_issues_three_requests() {
        let server = MockServer::start().await;

        for (start_at, count) in [(0u64, 100u64), (100, 100), (200, 50)] {
            Mock::given(method("GET"))
                .and(path("/rest/api/2/search"))
                .and(query_param("startAt", start_at.to_string()))
                .and(query_param("maxResults", "100"))
                .respond_with(ResponseTemplate::new(200).set_body_json(page(start_at, 250, count)))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = JiraClient::new(&server.uri()).unwrap();
        let schema = Arc::new(IssueSchema::new(
            "customfield_1",
            "customfield_2",
            "Incompatible change",
            "Reviewed",
        ));
        let query = SearchQuery::new(vec!["HDFS".into()], vec!["2.7.0".into()]);

        let issues = client.search_all(&query, schema).await.unwrap();
        assert_eq!(issues.len(), 250);

        let received = server.received_requests().await.unwrap();
        let searches = received
            .iter()
            .filter(|r| r.url.path() == "/rest/api/2/search")
            .count();
        assert_eq!(searches, 3);
    }

    #[tokio::test]
    async fn test_empty_search_returns_no_issues() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "startAt": 0,
                "maxResults": 0,
                "total": 0,
                "issues": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = JiraClient::new(&server.uri()).unwrap();
        let schema = Arc::new(IssueSchema::new("a", "b", "c", "d"));
        let query = SearchQuery::new(vec!["HDFS".into()], vec!["9.0.0".into()]);
        let issues = client.search_all(&query, schema).await.unwrap();
        assert_eq!(issues.len(), 0);
    }

    #[tokio::test]
    async fn test_page_without_progress_is_stalled() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "startAt": 0,
                "maxResults": 0,
                "total": 5,
                "issues": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = JiraClient::new(&server.uri()).unwrap();
        let schema = Arc::new(IssueSchema::new("a", "b", "c", "d"));
        let query = SearchQuery::new(vec!["HDFS".into()], vec!["2.7.0".into()]);
        let err = client.search_all(&query, schema).await.unwrap_err();
        assert!(matches!(err, JiraError::Stalled { start_at: 0, total: 5 }));
    }

    #[tokio::test]
    async fn test_search_sends_jql() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .and(query_param(
                "jql",
                "project in (HDFS) and fixVersion in ('2.7.0') and resolution = Fixed",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 1, 1)))
            .expect(1)
            .mount(&server)
            .await;

        let client = JiraClient::new(&server.uri()).unwrap();
        let schema = Arc::new(IssueSchema::new("a", "b", "c", "d"));
        let query = SearchQuery::new(vec!["HDFS".into()], vec!["2.7.0".into()]);
        let issues: Vec<_> = client
            .search_all(&query, schema)
            .await
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(issues.len(), 1);
    }

    #[tokio::test]
    async fn test_error_messages_abort() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "errorMessages": ["The value '9.9.9' does not exist for the field 'fixVersion'."],
                "errors": {}
            })))
            .mount(&server)
            .await;

        let client = JiraClient::new(&server.uri()).unwrap();
        let schema = Arc::new(IssueSchema::new("a", "b", "c", "d"));
        let query = SearchQuery::new(vec!["HDFS".into()], vec!["9.9.9".into()]);
        let err = client.search_all(&query, schema).await.unwrap_err();
        match err {
            JiraError::Search(messages) => assert!(messages[0].contains("9.9.9")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_without_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let client = JiraClient::new(&server.uri()).unwrap();
        let err = client.search_page("project = HDFS", 0).await.unwrap_err();
        assert!(matches!(err, JiraError::ApiError { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_fetch_fixed_issues_requires_configured_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/field"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "customfield_2", "name": "Hadoop Flags"}
            ])))
            .mount(&server)
            .await;

        let client = JiraClient::new(&server.uri()).unwrap();
        let err = client
            .fetch_fixed_issues(&Config::default(), &["2.7.0".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, JiraError::UnknownField(name) if name == "Release Note"));
    }

    #[tokio::test]
    async fn test_fetch_fixed_issues() {
        let server = MockServer::start().await;
        mount_fields(&server).await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 2, 2)))
            .expect(1)
            .mount(&server)
            .await;

        let client = JiraClient::new(&server.uri()).unwrap();
        let issues: Vec<_> = client
            .fetch_fixed_issues(&Config::default(), &["2.7.0".to_string()])
            .await
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].id(), "HDFS-1");
        assert_eq!(issues[0].release_note(), "");
    }
}

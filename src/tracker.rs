//! Issue-tracker capability consumed by the report pipeline.

use async_trait::async_trait;
use jira_api::{JiraClient, JiraError, SearchResponse, Worklog};

/// The three tracker queries the report needs.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// One page of issues matching `jql`, starting at record offset `start_at`.
    async fn search(&self, jql: &str, start_at: u64, max_results: u64) -> Result<SearchResponse, JiraError>;

    /// Ids of worklogs updated at or after `since_secs` (unix seconds).
    async fn worklogs_updated_since(&self, since_secs: i64) -> Result<Vec<String>, JiraError>;

    async fn worklogs_by_ids(&self, ids: &[String]) -> Result<Vec<Worklog>, JiraError>;
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn search(&self, jql: &str, start_at: u64, max_results: u64) -> Result<SearchResponse, JiraError> {
        JiraClient::search(self, jql, start_at, max_results).await
    }

    async fn worklogs_updated_since(&self, since_secs: i64) -> Result<Vec<String>, JiraError> {
        JiraClient::worklogs_updated_since(self, since_secs).await
    }

    async fn worklogs_by_ids(&self, ids: &[String]) -> Result<Vec<Worklog>, JiraError> {
        JiraClient::worklogs_by_ids(self, ids).await
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use jira_api::{Issue, WorklogAuthor};
    use reqwest::StatusCode;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Search { jql: String, start_at: u64, max_results: u64 },
        UpdatedSince(i64),
        ByIds(Vec<String>),
    }

    /// In-memory tracker serving issues by offset, the way Jira pages them.
    #[derive(Default)]
    pub struct FakeTracker {
        pub results: HashMap<String, Vec<Issue>>,
        pub worklogs: Vec<Worklog>,
        pub fail_searches: bool,
        pub calls: Mutex<Vec<Call>>,
    }

    impl FakeTracker {
        pub fn with_results(mut self, jql: &str, issues: Vec<Issue>) -> Self {
            self.results.insert(jql.to_string(), issues);
            self
        }

        pub fn with_worklogs(mut self, worklogs: Vec<Worklog>) -> Self {
            self.worklogs = worklogs;
            self
        }

        pub fn failing(mut self) -> Self {
            self.fail_searches = true;
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        pub fn search_calls(&self) -> usize {
            self.calls()
                .iter()
                .filter(|call| matches!(call, Call::Search { .. }))
                .count()
        }
    }

    #[async_trait]
    impl IssueTracker for FakeTracker {
        async fn search(&self, jql: &str, start_at: u64, max_results: u64) -> Result<SearchResponse, JiraError> {
            self.calls.lock().unwrap().push(Call::Search {
                jql: jql.to_string(),
                start_at,
                max_results,
            });
            if self.fail_searches {
                return Err(JiraError::http(StatusCode::SERVICE_UNAVAILABLE, "down"));
            }
            let all = self.results.get(jql).cloned().unwrap_or_default();
            let issues = all
                .iter()
                .skip(start_at as usize)
                .take(max_results as usize)
                .cloned()
                .collect();
            Ok(SearchResponse {
                issues,
                total: all.len() as u64,
                start_at,
                max_results,
            })
        }

        async fn worklogs_updated_since(&self, since_secs: i64) -> Result<Vec<String>, JiraError> {
            self.calls.lock().unwrap().push(Call::UpdatedSince(since_secs));
            Ok(self.worklogs.iter().map(|worklog| worklog.id.clone()).collect())
        }

        async fn worklogs_by_ids(&self, ids: &[String]) -> Result<Vec<Worklog>, JiraError> {
            self.calls.lock().unwrap().push(Call::ByIds(ids.to_vec()));
            Ok(self
                .worklogs
                .iter()
                .filter(|worklog| ids.contains(&worklog.id))
                .cloned()
                .collect())
        }
    }

    pub fn worklog(id: &str, issue_id: &str, author: &str, seconds: u64) -> Worklog {
        Worklog {
            id: id.to_string(),
            issue_id: issue_id.to_string(),
            update_author: WorklogAuthor {
                display_name: author.to_string(),
            },
            time_spent_seconds: seconds,
        }
    }
}

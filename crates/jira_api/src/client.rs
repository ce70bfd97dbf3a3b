use crate::auth::authorization_header;
use crate::config::JiraConfig;
use crate::error::{JiraError, Result};
use crate::models::{
    SearchRequest, SearchResponse, Worklog, WorklogListRequest, WorklogUpdatedPage,
};
use crate::pacer::RequestPacer;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Jira accepts at most this many ids per `worklog/list` call.
pub const WORKLOG_LIST_LIMIT: usize = 1000;

#[derive(Clone)]
pub struct JiraClient {
    http: HttpClient,
    config: JiraConfig,
    pacer: RequestPacer,
}

impl JiraClient {
    pub fn new(config: JiraConfig) -> Result<Self> {
        let pacer = RequestPacer::new(config.cooldown);
        Self::new_with_pacer(config, pacer)
    }

    pub fn new_with_pacer(config: JiraConfig, pacer: RequestPacer) -> Result<Self> {
        let http = build_http_client(&config)?;
        Ok(Self {
            http,
            config,
            pacer,
        })
    }

    pub async fn get_with_query<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.pacer.wait_turn().await;
        debug!(path, "jira GET");
        let response = self.http.get(self.url_for(path)).query(query).send().await?;
        Self::parse_json(path, response).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.pacer.wait_turn().await;
        debug!(path, "jira POST");
        let response = self.http.post(self.url_for(path)).json(body).send().await?;
        Self::parse_json(path, response).await
    }

    fn url_for(&self, path: &str) -> String {
        let mut base = self.config.normalized_root();
        base.push_str(path.trim_start_matches('/'));
        base
    }

    async fn parse_json<T>(path: &str, response: Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(JiraError::from);
        }
        let body = response.text().await.unwrap_or_default();
        warn!(path, %status, "jira request failed");
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Err(JiraError::Authentication(format!(
                "Access denied ({}) - {}",
                status, body
            )))
        } else {
            Err(JiraError::http(status, &body))
        }
    }

    /// Fetches one page of issues matching `jql`, starting at record offset `start_at`.
    pub async fn search(&self, jql: &str, start_at: u64, max_results: u64) -> Result<SearchResponse> {
        let payload = SearchRequest::new(jql, start_at, max_results);
        let page: SearchResponse = self.post("search", &payload).await?;
        debug!(
            start_at,
            returned = page.issues.len(),
            total = page.total,
            "jira search page"
        );
        Ok(page)
    }

    /// Ids of every worklog updated at or after `since_secs` (unix seconds).
    ///
    /// The endpoint itself pages by time; pages are followed until Jira
    /// reports `lastPage`, continuing from each page's `until`.
    pub async fn worklogs_updated_since(&self, since_secs: i64) -> Result<Vec<String>> {
        let mut since_ms = since_secs.saturating_mul(1000);
        let mut ids = Vec::new();
        loop {
            let page: WorklogUpdatedPage = self
                .get_with_query("worklog/updated", &[("since", since_ms.to_string())])
                .await?;
            ids.extend(page.values.into_iter().map(|value| value.worklog_id));
            if page.last_page {
                break;
            }
            match page.until {
                Some(until) if until > since_ms => since_ms = until,
                _ => {
                    warn!(since_ms, "worklog/updated page did not advance; stopping");
                    break;
                }
            }
        }
        debug!(count = ids.len(), "collected updated worklog ids");
        Ok(ids)
    }

    /// Full worklog records for `ids`, requested in chunks the API accepts.
    pub async fn worklogs_by_ids(&self, ids: &[String]) -> Result<Vec<Worklog>> {
        let mut worklogs = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(WORKLOG_LIST_LIMIT) {
            let batch: Vec<Worklog> = self.post("worklog/list", &WorklogListRequest::new(chunk)).await?;
            worklogs.extend(batch);
        }
        Ok(worklogs)
    }
}

fn build_http_client(config: &JiraConfig) -> Result<HttpClient> {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization_header(config)?);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&config.user_agent).map_err(|err| JiraError::Configuration(err.to_string()))?,
    );

    HttpClient::builder()
        .default_headers(headers)
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .build()
        .map_err(|err| JiraError::Configuration(err.to_string()))
}

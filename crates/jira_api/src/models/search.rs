use serde::{Deserialize, Serialize};

use super::issue::Issue;

/// Fields requested for every search; the report needs nothing else.
pub const SEARCH_FIELDS: [&str; 2] = ["summary", "parent"];

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
    pub fields: &'a [&'a str],
    pub jql: &'a str,
    pub start_at: u64,
    pub max_results: u64,
}

impl<'a> SearchRequest<'a> {
    pub fn new(jql: &'a str, start_at: u64, max_results: u64) -> Self {
        Self {
            fields: &SEARCH_FIELDS,
            jql,
            start_at,
            max_results,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub start_at: u64,
    #[serde(default)]
    pub max_results: u64,
}

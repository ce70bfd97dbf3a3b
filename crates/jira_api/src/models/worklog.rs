use serde::{Deserialize, Serialize};

use super::de::id_string;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Worklog {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "id_string")]
    pub issue_id: String,
    pub update_author: WorklogAuthor,
    #[serde(default)]
    pub time_spent_seconds: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorklogAuthor {
    pub display_name: String,
}

impl Worklog {
    pub fn author(&self) -> &str {
        &self.update_author.display_name
    }
}

/// One page of `GET worklog/updated`.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorklogUpdatedPage {
    #[serde(default)]
    pub values: Vec<UpdatedWorklog>,
    #[serde(default)]
    pub since: Option<i64>,
    #[serde(default)]
    pub until: Option<i64>,
    #[serde(default = "default_last_page")]
    pub last_page: bool,
}

fn default_last_page() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedWorklog {
    #[serde(deserialize_with = "id_string")]
    pub worklog_id: String,
}

#[derive(Debug, Serialize)]
pub struct WorklogListRequest<'a> {
    pub ids: Vec<WireId<'a>>,
}

/// Worklog ids go back over the wire as numbers when they look numeric.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WireId<'a> {
    Number(u64),
    Text(&'a str),
}

impl<'a> WorklogListRequest<'a> {
    pub fn new(ids: &'a [String]) -> Self {
        let ids = ids
            .iter()
            .map(|id| match id.parse::<u64>() {
                Ok(number) => WireId::Number(number),
                Err(_) => WireId::Text(id.as_str()),
            })
            .collect();
        Self { ids }
    }
}

use serde::{Deserialize, Serialize};

use super::de::id_string;

/// An issue as returned by `search` when only `summary` and `parent` are requested.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Issue {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: String,
    #[serde(default)]
    pub fields: IssueFields,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct IssueFields {
    #[serde(default, deserialize_with = "nullable_string")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<IssueRef>,
}

/// Weak reference to another issue by id.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct IssueRef {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Issue {
    pub fn parent_id(&self) -> Option<&str> {
        self.fields.parent.as_ref().map(|parent| parent.id.as_str())
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

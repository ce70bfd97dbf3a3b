use serde::de::{Deserializer, Error as DeError};
use serde::Deserialize;
use serde_json::Value;

/// Accepts an identifier encoded either as a JSON string or a JSON number.
///
/// Jira returns issue and worklog ids as strings in most payloads but as
/// numbers in a few (`worklog/updated`), so both decode to the same `String`.
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Err(D::Error::custom("empty identifier"))
            } else {
                Ok(trimmed.to_string())
            }
        }
        Value::Number(number) => Ok(number.to_string()),
        other => Err(D::Error::custom(format!("expected string or number id, got {other}"))),
    }
}

//! Error model used by Jira API client operations.

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, JiraError>;

/// Transport-level failures of a Jira call: non-success statuses, rejected credentials, timeouts, unreachable hosts and payloads that do not decode.
#[derive(Debug, Error)]
pub enum JiraError {
    #[error("http {status}: {message}")]
    Http {
        status: StatusCode,
        message: String,
    },
    #[error("authentication error: {0}")]
    Authentication(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("invalid client configuration: {0}")]
    Configuration(String),
}

impl JiraError {
    /// Builds an HTTP error, preferring Jira's `errorMessages` over the raw body.
    pub fn http(status: StatusCode, body: &str) -> Self {
        JiraError::Http {
            status,
            message: extract_error_message(body).unwrap_or_else(|| body.to_string()),
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, JiraError::Authentication(_))
    }
}

impl From<reqwest::Error> for JiraError {
    /// Converts reqwest errors into semantic JiraError variants.
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            JiraError::Timeout(err.to_string())
        } else if err.is_status() {
            let status = err.status().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            JiraError::Http {
                status,
                message: err.to_string(),
            }
        } else if err.is_connect() {
            JiraError::Network(err.to_string())
        } else if err.is_decode() {
            JiraError::Serialization(err.to_string())
        } else if err.is_builder() {
            JiraError::Configuration(err.to_string())
        } else {
            JiraError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for JiraError {
    fn from(err: serde_json::Error) -> Self {
        JiraError::Serialization(err.to_string())
    }
}

// Jira reports failures as {"errorMessages": [...], "errors": {...}}.
fn extract_error_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<serde_json::Value>(body).ok()?;
    let messages: Vec<&str> = value
        .get("errorMessages")?
        .as_array()?
        .iter()
        .filter_map(|message| message.as_str())
        .collect();
    if messages.is_empty() {
        None
    } else {
        Some(messages.join("; "))
    }
}

//! Tabular sinks the finished report is written to.

mod console;
mod google_auth;
mod sheets;

pub use console::{render_table, ConsoleSink};
pub use google_auth::{ServiceAccountAuth, ServiceAccountKey, GOOGLE_TOKEN_URL, SHEETS_SCOPE};
pub use sheets::{SheetsSink, SHEETS_API_BASE};

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

/// Destination for the report table. Calls arrive as clear, header, rows.
#[async_trait]
pub trait TabularSink: Send + Sync {
    async fn set_header(&self, header: &[&str]) -> Result<(), SinkError>;

    /// Removes everything previously written, header included.
    async fn clear(&self) -> Result<(), SinkError>;

    async fn append_rows(&self, rows: &[Vec<String>]) -> Result<(), SinkError>;
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("http {status}: {message}")]
    Http { status: StatusCode, message: String },
    #[error("authentication error: {0}")]
    Authentication(String),
    #[error("invalid service account credentials: {0}")]
    Credentials(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for SinkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SinkError::Timeout(err.to_string())
        } else if err.is_decode() {
            SinkError::Serialization(err.to_string())
        } else if let Some(status) = err.status() {
            SinkError::Http {
                status,
                message: err.to_string(),
            }
        } else {
            SinkError::Network(err.to_string())
        }
    }
}

impl From<jsonwebtoken::errors::Error> for SinkError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        SinkError::Credentials(err.to_string())
    }
}

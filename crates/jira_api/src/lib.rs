//! Typed Jira REST client covering issue search and worklog retrieval.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod pacer;

pub use client::{JiraClient, WORKLOG_LIST_LIMIT};
pub use config::{AuthMethod, JiraConfig, DEFAULT_COOLDOWN_MS};
pub use error::{JiraError, Result};
pub use models::{Issue, IssueFields, IssueRef, SearchResponse, Worklog, WorklogAuthor};
pub use pacer::RequestPacer;

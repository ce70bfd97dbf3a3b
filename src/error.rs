//! Failure taxonomy of a report run.

use jira_api::JiraError;
use thiserror::Error;

use crate::sink::SinkError;

/// Why a report run was aborted. Every variant aborts the whole run; nothing is retried here.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("issue tracker request failed: {0}")]
    Tracker(#[from] JiraError),
    #[error("report sink request failed: {0}")]
    Sink(#[from] SinkError),
    #[error("ledger entry for {member} references issue {issue_id}, which is not in the issue set")]
    DataConsistency { member: String, issue_id: String },
}

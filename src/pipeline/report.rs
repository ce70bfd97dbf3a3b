//! Report rows and their spreadsheet cell layout.

use super::aggregate::MemberLedger;
use crate::error::ReportError;
use crate::issue_set::IssueSet;

pub const REPORT_HEADER: [&str; 5] = ["Team Member", "Time Logged", "Issue", "Summary", "Link"];

/// One line of the published report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRow {
    /// First row of a member's block, carrying their total.
    Summary { member: String, total_time: String },
    Detail {
        member: String,
        time: String,
        issue_key: String,
        summary: String,
        link: String,
    },
    /// Separates member blocks.
    Blank,
}

impl ReportRow {
    /// Cells in header column order; trailing empty columns are omitted.
    pub fn cells(&self) -> Vec<String> {
        match self {
            ReportRow::Summary { member, total_time } => vec![member.clone(), total_time.clone()],
            ReportRow::Detail {
                member,
                time,
                issue_key,
                summary,
                link,
            } => vec![
                member.clone(),
                time.clone(),
                issue_key.clone(),
                summary.clone(),
                link.clone(),
            ],
            ReportRow::Blank => Vec::new(),
        }
    }
}

/// Renders seconds as `"{h}h {m}m"`, truncating leftover seconds.
pub fn format_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{}h {}m", hours, minutes)
}

/// Lays out one block per member: summary row, one detail row per issue, blank row.
///
/// Fails if the ledger mentions an issue id missing from `issues`.
pub fn build_rows(ledger: &MemberLedger, issues: &IssueSet) -> Result<Vec<ReportRow>, ReportError> {
    let mut rows = Vec::new();
    for (member, logged) in ledger.members() {
        let total: u64 = logged.values().sum();
        rows.push(ReportRow::Summary {
            member: member.to_string(),
            total_time: format_time(total),
        });
        for (issue_id, seconds) in logged {
            let issue = issues.get(issue_id).ok_or_else(|| ReportError::DataConsistency {
                member: member.to_string(),
                issue_id: issue_id.clone(),
            })?;
            rows.push(ReportRow::Detail {
                member: member.to_string(),
                time: format_time(*seconds),
                issue_key: issue.key.clone(),
                summary: issue.fields.summary.clone(),
                link: issue.self_url.clone(),
            });
        }
        rows.push(ReportRow::Blank);
    }
    Ok(rows)
}

//! Collects worklogs updated inside the trailing report window.

use chrono::{DateTime, Utc};
use jira_api::{JiraError, Worklog};
use log::debug;

use crate::tracker::IssueTracker;

pub const DEFAULT_WINDOW_DAYS: u32 = 14;
const SECONDS_PER_DAY: i64 = 86_400;

/// Start of the trailing window, in unix seconds.
/// Saturates instead of overflowing for any `u32` day count.
pub fn since_timestamp(now: DateTime<Utc>, window_days: u32) -> i64 {
    now.timestamp()
        .saturating_sub(i64::from(window_days).saturating_mul(SECONDS_PER_DAY))
}

/// Worklogs updated within the last `window_days` days before `now`.
pub async fn collect_recent<T>(
    tracker: &T,
    window_days: u32,
    now: DateTime<Utc>,
) -> Result<Vec<Worklog>, JiraError>
where
    T: IssueTracker + ?Sized,
{
    let since = since_timestamp(now, window_days);
    let ids = tracker.worklogs_updated_since(since).await?;
    if ids.is_empty() {
        debug!("no worklogs updated since {}", since);
        return Ok(Vec::new());
    }
    let worklogs = tracker.worklogs_by_ids(&ids).await?;
    debug!("fetched {} of {} updated worklog(s)", worklogs.len(), ids.len());
    Ok(worklogs)
}

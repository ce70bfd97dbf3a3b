//! Paginated issue search.

use jira_api::JiraError;
use log::debug;

use crate::issue_set::IssueSet;
use crate::tracker::IssueTracker;

pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// Collects every issue matching `jql`, one page at a time.
///
/// Pages are requested strictly in sequence. The loop ends once
/// `page_size * pages` reaches the `total` the tracker reported on the
/// latest page, so a query with no matches costs exactly one request.
pub async fn search<T>(tracker: &T, jql: &str, page_size: u64) -> Result<IssueSet, JiraError>
where
    T: IssueTracker + ?Sized,
{
    let page_size = page_size.max(1);
    let mut issues = IssueSet::new();
    let mut records_read = 0u64;
    let mut page = 0u64;

    loop {
        let response = tracker.search(jql, records_read, page_size).await?;
        for issue in response.issues {
            issues.insert(issue);
        }
        records_read += page_size;
        page += 1;
        if records_read >= response.total {
            break;
        }
    }

    debug!("search `{}` read {} page(s), {} issue(s)", jql, page, issues.len());
    Ok(issues)
}

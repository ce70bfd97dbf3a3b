mod de;
mod issue;
mod search;
mod worklog;

pub use issue::{Issue, IssueFields, IssueRef};
pub use search::{SearchRequest, SearchResponse, SEARCH_FIELDS};
pub use worklog::{UpdatedWorklog, WireId, Worklog, WorklogAuthor, WorklogListRequest, WorklogUpdatedPage};

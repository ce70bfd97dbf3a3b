//! Report pipeline: issue search, subtask folding, worklog collection,
//! aggregation and row synthesis. Each stage is a plain function over the
//! previous stage's output so it can be exercised in isolation.

pub mod aggregate;
pub mod merge;
pub mod report;
pub mod search;
pub mod worklogs;

pub use aggregate::{aggregate, MemberLedger};
pub use merge::{merge_subtasks, MergeSummary};
pub use report::{build_rows, format_time, ReportRow, REPORT_HEADER};
pub use search::{search, DEFAULT_PAGE_SIZE};
pub use worklogs::{collect_recent, since_timestamp, DEFAULT_WINDOW_DAYS};

//! One end-to-end report run: tracker stages first, sink writes last.

use std::sync::Arc;

use chrono::Utc;
use log::{debug, info};

use crate::error::ReportError;
use crate::pipeline::{self, REPORT_HEADER};
use crate::sink::TabularSink;
use crate::tracker::IssueTracker;

/// Per-run knobs taken from the startup configuration.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub issue_query: String,
    pub subtask_query: String,
    pub window_days: u32,
    pub page_size: u64,
}

/// What a successful run published.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub issues: usize,
    pub linked_subtasks: usize,
    pub worklogs: usize,
    pub members: usize,
    pub rows: usize,
}

pub struct ReportRunner {
    tracker: Arc<dyn IssueTracker>,
    sink: Arc<dyn TabularSink>,
    settings: RunSettings,
}

impl ReportRunner {
    pub fn new(tracker: Arc<dyn IssueTracker>, sink: Arc<dyn TabularSink>, settings: RunSettings) -> Self {
        Self {
            tracker,
            sink,
            settings,
        }
    }

    /// Runs every stage in order. The sink is only touched once all tracker
    /// data is in hand, so a tracker failure leaves the previous report intact.
    pub async fn run_once(&self) -> Result<RunSummary, ReportError> {
        let tracker = self.tracker.as_ref();
        let settings = &self.settings;

        let mut issues = pipeline::search(tracker, &settings.issue_query, settings.page_size).await?;
        let subtasks = pipeline::search(tracker, &settings.subtask_query, settings.page_size).await?;
        let merged = pipeline::merge_subtasks(&mut issues, subtasks);
        debug!("{} sprint issue(s) after merge", issues.len());

        let worklogs = pipeline::collect_recent(tracker, settings.window_days, Utc::now()).await?;
        let ledger = pipeline::aggregate(&worklogs, &issues);
        let rows = pipeline::build_rows(&ledger, &issues)?;
        let cells: Vec<Vec<String>> = rows.iter().map(|row| row.cells()).collect();

        self.sink.clear().await?;
        self.sink.set_header(&REPORT_HEADER).await?;
        self.sink.append_rows(&cells).await?;

        let summary = RunSummary {
            issues: issues.len(),
            linked_subtasks: merged.linked,
            worklogs: worklogs.len(),
            members: ledger.len(),
            rows: rows.len(),
        };
        info!(
            "Report published: {} member(s), {} row(s) from {} worklog(s) on {} issue(s)",
            summary.members, summary.rows, summary.worklogs, summary.issues
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue_set::fixtures::{issue, subtask};
    use crate::sink::fake::{RecordingSink, SinkCall};
    use crate::tracker::fake::{worklog, FakeTracker};

    fn settings() -> RunSettings {
        RunSettings {
            issue_query: "sprint".to_string(),
            subtask_query: "subtasks".to_string(),
            window_days: 14,
            page_size: 50,
        }
    }

    #[tokio::test]
    async fn publishes_clear_header_then_rows() {
        let tracker = FakeTracker::default()
            .with_results("sprint", vec![issue("I1", "OPS-1", "Build pipeline")])
            .with_results("subtasks", vec![subtask("S1", "OPS-2", "I1")])
            .with_worklogs(vec![
                worklog("1", "I1", "Alice", 3600),
                worklog("2", "S1", "Alice", 600),
                worklog("3", "other", "Bob", 600),
            ]);
        let sink = Arc::new(RecordingSink::default());
        let runner = ReportRunner::new(Arc::new(tracker), sink.clone(), settings());

        let summary = runner.run_once().await.expect("run succeeds");

        assert_eq!(
            summary,
            RunSummary {
                issues: 1,
                linked_subtasks: 1,
                worklogs: 3,
                members: 1,
                rows: 3,
            }
        );
        let link = "https://jira.example.com/rest/api/2/issue/I1".to_string();
        assert_eq!(
            sink.calls(),
            vec![
                SinkCall::Clear,
                SinkCall::Header(REPORT_HEADER.iter().map(|cell| cell.to_string()).collect()),
                SinkCall::Rows(vec![
                    vec!["Alice".to_string(), "1h 0m".to_string()],
                    vec![
                        "Alice".to_string(),
                        "1h 0m".to_string(),
                        "OPS-1".to_string(),
                        "Build pipeline".to_string(),
                        link,
                    ],
                    Vec::new(),
                ]),
            ]
        );
    }

    #[tokio::test]
    async fn tracker_failure_never_touches_sink() {
        let sink = Arc::new(RecordingSink::default());
        let runner = ReportRunner::new(Arc::new(FakeTracker::default().failing()), sink.clone(), settings());

        let err = runner.run_once().await.expect_err("run fails");

        assert!(matches!(err, ReportError::Tracker(_)));
        assert!(sink.calls().is_empty());
    }

    #[tokio::test]
    async fn empty_worklog_batch_writes_only_the_header() {
        let tracker = FakeTracker::default().with_results("sprint", vec![issue("I1", "OPS-1", "a")]);
        let sink = Arc::new(RecordingSink::default());
        let runner = ReportRunner::new(Arc::new(tracker), sink.clone(), settings());

        let summary = runner.run_once().await.expect("run succeeds");

        assert_eq!(summary.rows, 0);
        assert_eq!(sink.calls().last(), Some(&SinkCall::Rows(Vec::new())));
    }

    #[tokio::test]
    async fn sink_failure_aborts_the_run() {
        let tracker = FakeTracker::default().with_results("sprint", vec![issue("I1", "OPS-1", "a")]);
        let sink = Arc::new(RecordingSink {
            fail_clear: true,
            ..Default::default()
        });
        let runner = ReportRunner::new(Arc::new(tracker), sink.clone(), settings());

        let err = runner.run_once().await.expect_err("run fails");

        assert!(matches!(err, ReportError::Sink(_)));
        assert_eq!(sink.calls(), vec![SinkCall::Clear]);
    }
}

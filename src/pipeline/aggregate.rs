//! Per-member time ledger built from the collected worklogs.

use indexmap::IndexMap;
use jira_api::Worklog;

use crate::issue_set::IssueSet;

/// Seconds logged per member per issue, in first-seen order at both levels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberLedger {
    members: IndexMap<String, IndexMap<String, u64>>,
}

impl MemberLedger {
    /// Empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `seconds` to the (member, issue) total, creating either entry on first use.
    pub fn record(&mut self, member: &str, issue_id: &str, seconds: u64) {
        let issues = self.members.entry(member.to_string()).or_default();
        let total = issues.entry(issue_id.to_string()).or_insert(0);
        *total = total.saturating_add(seconds);
    }

    /// Seconds recorded for one member on one issue, if any.
    pub fn seconds(&self, member: &str, issue_id: &str) -> Option<u64> {
        self.members.get(member)?.get(issue_id).copied()
    }

    /// Members with their per-issue totals, in first-seen order.
    pub fn members(&self) -> impl Iterator<Item = (&str, &IndexMap<String, u64>)> {
        self.members.iter().map(|(member, issues)| (member.as_str(), issues))
    }

    /// Sum over every issue the member logged time on.
    pub fn member_total(&self, member: &str) -> u64 {
        self.members
            .get(member)
            .map(|issues| issues.values().sum())
            .unwrap_or(0)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when no worklog was recorded.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Sums worklog time per member and issue, ignoring worklogs on issues outside `issues`.
///
/// Members are matched by exact display name.
pub fn aggregate(worklogs: &[Worklog], issues: &IssueSet) -> MemberLedger {
    let mut ledger = MemberLedger::new();
    for worklog in worklogs {
        if !issues.contains(&worklog.issue_id) {
            continue;
        }
        ledger.record(worklog.author(), &worklog.issue_id, worklog.time_spent_seconds);
    }
    ledger
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue_set::fixtures::{issue, subtask};
    use crate::tracker::fake::worklog;

    fn sprint() -> IssueSet {
        vec![issue("I1", "OPS-1", "a"), issue("I2", "OPS-2", "b")].into_iter().collect()
    }

    #[test]
    fn sums_per_member_and_issue() {
        let worklogs = vec![
            worklog("1", "I1", "Alice", 1800),
            worklog("2", "I1", "Alice", 1800),
            worklog("3", "I2", "Alice", 600),
            worklog("4", "I1", "Bob", 300),
        ];

        let ledger = aggregate(&worklogs, &sprint());

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.seconds("Alice", "I1"), Some(3600));
        assert_eq!(ledger.seconds("Alice", "I2"), Some(600));
        assert_eq!(ledger.seconds("Bob", "I1"), Some(300));
        assert_eq!(ledger.member_total("Alice"), 4200);
    }

    #[test]
    fn totals_do_not_depend_on_worklog_order() {
        let mut worklogs = vec![
            worklog("1", "I1", "Alice", 100),
            worklog("2", "I2", "Bob", 200),
            worklog("3", "I1", "Alice", 300),
            worklog("4", "I2", "Alice", 400),
        ];
        let forward = aggregate(&worklogs, &sprint());
        worklogs.reverse();
        let backward = aggregate(&worklogs, &sprint());

        for (member, issue_id) in [("Alice", "I1"), ("Alice", "I2"), ("Bob", "I2")] {
            assert_eq!(forward.seconds(member, issue_id), backward.seconds(member, issue_id));
        }
        assert_eq!(forward.seconds("Alice", "I1"), Some(400));
    }

    #[test]
    fn out_of_scope_worklogs_create_no_member() {
        let worklogs = vec![worklog("1", "elsewhere", "Carol", 3600), worklog("2", "I1", "Alice", 60)];

        let ledger = aggregate(&worklogs, &sprint());

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.member_total("Carol"), 0);
        assert!(ledger.members().all(|(member, _)| member != "Carol"));
    }

    #[test]
    fn subtask_worklogs_only_count_when_subtask_is_a_key() {
        let mut issues: IssueSet = vec![issue("P1", "OPS-1", "Story")].into_iter().collect();
        crate::pipeline::merge_subtasks(&mut issues, vec![subtask("S1", "OPS-2", "P1")].into_iter().collect());

        let ledger = aggregate(&[worklog("1", "S1", "Alice", 600)], &issues);

        assert!(ledger.is_empty());
    }

    #[test]
    fn display_names_are_case_sensitive() {
        let worklogs = vec![worklog("1", "I1", "alice", 60), worklog("2", "I1", "Alice", 60)];
        assert_eq!(aggregate(&worklogs, &sprint()).len(), 2);
    }

    #[test]
    fn empty_batch_yields_empty_ledger() {
        assert!(aggregate(&[], &sprint()).is_empty());
    }
}

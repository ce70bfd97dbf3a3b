//! Issue set keyed by issue id, rebuilt from scratch on every run.

use jira_api::Issue;
use std::collections::HashMap;

/// Issues in scope for the current report, keyed by issue id.
#[derive(Debug, Clone, Default)]
pub struct IssueSet {
    issues: HashMap<String, Issue>,
}

impl IssueSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an issue, replacing any previous record with the same id.
    pub fn insert(&mut self, issue: Issue) -> Option<Issue> {
        self.issues.insert(issue.id.clone(), issue)
    }

    /// True when an issue with this id is in the set.
    pub fn contains(&self, id: &str) -> bool {
        self.issues.contains_key(id)
    }

    /// Issue stored under `id`.
    pub fn get(&self, id: &str) -> Option<&Issue> {
        self.issues.get(id)
    }

    /// Number of issues.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// True when the set holds no issue.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Consumes the set, yielding its issues in no particular order.
    pub fn into_issues(self) -> impl Iterator<Item = Issue> {
        self.issues.into_values()
    }
}

impl FromIterator<Issue> for IssueSet {
    fn from_iter<I: IntoIterator<Item = Issue>>(iter: I) -> Self {
        let mut set = IssueSet::new();
        for issue in iter {
            set.insert(issue);
        }
        set
    }
}

//! Folds the project's subtasks into the sprint issue set.

use log::debug;

use crate::issue_set::IssueSet;

/// Outcome counts of folding subtasks into the sprint issue set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Subtasks whose parent is in the sprint.
    pub linked: usize,
    /// Subtasks whose parent is outside the sprint, or that have no parent.
    pub dropped: usize,
}

/// Folds `subtasks` into `issues` under their parent ids.
///
/// A subtask never becomes a top-level entry under its own id; its parent
/// stays keyed by the parent id, untouched. Subtasks whose parent is not in
/// `issues` are discarded.
pub fn merge_subtasks(issues: &mut IssueSet, subtasks: IssueSet) -> MergeSummary {
    let mut summary = MergeSummary::default();
    for subtask in subtasks.into_issues() {
        match subtask.parent_id() {
            Some(parent_id) if issues.contains(parent_id) => summary.linked += 1,
            _ => summary.dropped += 1,
        }
    }
    debug!(
        "merged subtasks: {} linked to sprint parents, {} dropped",
        summary.linked, summary.dropped
    );
    summary
}

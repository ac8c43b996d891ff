//! Progress derivation and completion transitions.
//!
//! Everything here is pure over the typed plan plus the completed-task set.
//! Handlers recompute the percentage and persist after every transition;
//! the stored percentage is never trusted as an input.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::plan::{LearningPlan, PlanTask};
use crate::plan::schedule::current_week;

/// Cap on the dashboard's next-action list.
pub const NEXT_ACTIONS_LIMIT: usize = 3;

/// A pending task annotated with the week it is due.
#[derive(Debug, Clone, Serialize)]
pub struct NextAction {
    pub week: u32,
    #[serde(flatten)]
    pub task: PlanTask,
}

/// Direction a completion toggle took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionChange {
    Completed,
    Reopened,
}

/// Total number of tasks across every week; 0 for a plan with no weeks.
pub fn total_tasks(plan: &LearningPlan) -> usize {
    plan.weeks.iter().map(|week| week.tasks.len()).sum()
}

/// Percentage of `total` covered by `completed`, rounded half away from
/// zero. A plan with nothing to complete reports 0, not a division error.
pub fn completion_percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u32
}

/// The pending tasks of the current wall-clock week, in plan order, capped
/// at `NEXT_ACTIONS_LIMIT` and annotated with the week number.
///
/// Empty when the derived week has no positional entry: the plan defines
/// fewer weeks than its duration claims, or no weeks at all.
pub fn next_actions(
    plan: &LearningPlan,
    completed: &BTreeSet<String>,
    now: DateTime<Utc>,
) -> Vec<NextAction> {
    let week = current_week(plan, now);
    let week_data = match plan.weeks.get(week as usize - 1) {
        Some(data) => data,
        None => return vec![],
    };

    week_data
        .tasks
        .iter()
        .filter(|task| !completed.contains(&task.id))
        .take(NEXT_ACTIONS_LIMIT)
        .map(|task| NextAction {
            week,
            task: task.clone(),
        })
        .collect()
}

/// Completion percentage of a single week's task list (the plan page's
/// per-week progress bars). 0 for a week with no tasks.
pub fn week_progress(tasks: &[PlanTask], completed: &BTreeSet<String>) -> u32 {
    let done = tasks.iter().filter(|task| completed.contains(&task.id)).count();
    completion_percentage(done, tasks.len())
}

/// Marks a task complete. Set semantics: re-completing an already-complete
/// task changes nothing, and the set never holds duplicates. Returns whether
/// the task was newly completed.
pub fn mark_complete(completed: &mut BTreeSet<String>, task_id: &str) -> bool {
    completed.insert(task_id.to_string())
}

/// Flips a task's completion state and reports the direction taken.
pub fn toggle_complete(completed: &mut BTreeSet<String>, task_id: &str) -> CompletionChange {
    if completed.remove(task_id) {
        CompletionChange::Reopened
    } else {
        completed.insert(task_id.to_string());
        CompletionChange::Completed
    }
}

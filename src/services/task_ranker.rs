use std::cmp::Reverse;

use crate::models::task::{Priority, Task};
use crate::models::theme::{DailyTheme, Focus};

const THEME_MATCH_BONUS: i32 = 10;

/// Whether a task's notes or category speak to the day's focus. Substring
/// search over lower-cased text.
pub fn matches_focus(task: &Task, focus: Focus) -> bool {
    let notes = task.notes_lower();
    let has = |keyword: &str| notes.contains(keyword);

    match focus {
        Focus::Analytical => has("analysis") || has("study"),
        Focus::Meetings => has("meeting") || has("call"),
        Focus::Creative => has("creative") || has("design"),
        Focus::Planning => has("plan") || has("goal"),
        Focus::Execution => has("implement") || has("complete"),
        Focus::Personal => matches!(task.category_lower().as_str(), "personal" | "health"),
        _ => false,
    }
}

fn priority_bonus(priority: Priority) -> i32 {
    match priority {
        Priority::High => 5,
        Priority::Medium => 2,
        Priority::Low => 0,
    }
}

/// +10 for a focus match, plus +5 / +2 / +0 for high / medium / low priority.
pub fn affinity_score(task: &Task, theme: &DailyTheme) -> i32 {
    let bonus = if matches_focus(task, theme.focus) {
        THEME_MATCH_BONUS
    } else {
        0
    };
    bonus + priority_bonus(task.priority)
}

fn placement_key(task: &Task, theme: &DailyTheme) -> (Reverse<i32>, u8) {
    (Reverse(affinity_score(task, theme)), task.priority.rank())
}

/// Placement order for one day: score descending, then high priority first.
/// Equal entries keep their incoming order.
pub fn rank_tasks<'a>(tasks: &[&'a Task], theme: &DailyTheme) -> Vec<&'a Task> {
    let mut ranked = tasks.to_vec();
    ranked.sort_by_cached_key(|task| placement_key(task, theme));
    ranked
}

/// Same ordering as [`rank_tasks`], over indices into `tasks`.
pub fn rank_indices(tasks: &[Task], indices: &[usize], theme: &DailyTheme) -> Vec<usize> {
    let mut ranked = indices.to_vec();
    ranked.sort_by_cached_key(|idx| placement_key(&tasks[*idx], theme));
    ranked
}

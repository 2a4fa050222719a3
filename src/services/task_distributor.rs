use crate::models::task::{Priority, Task};
use crate::models::theme::{DailyTheme, Focus};

/// Candidate tasks for one day, as indices into the full task list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayAssignment {
    /// This day's share of the round-robin partition.
    pub assigned: Vec<usize>,
    /// Set only when the partition left the day empty: a task owned by another
    /// day, offered so the day still has a candidate.
    pub filler: Option<usize>,
}

impl DayAssignment {
    pub fn candidates(&self) -> Vec<usize> {
        let mut candidates = self.assigned.clone();
        candidates.extend(self.filler);
        candidates
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty() && self.filler.is_none()
    }
}

/// Broader affinity used when splitting tasks between days. Looks at category
/// and priority as well as note keywords.
pub fn is_theme_match(task: &Task, focus: Focus) -> bool {
    let category = task.category_lower();
    let notes = task.notes_lower();
    let has = |keyword: &str| notes.contains(keyword);
    let priority = task.priority;

    match focus {
        Focus::Analytical => {
            (matches!(category.as_str(), "work" | "learning") && has("analysis"))
                || has("study")
                || has("research")
                || priority == Priority::High
        }
        Focus::Meetings => {
            has("meeting") || has("call") || has("presentation") || category == "work"
        }
        Focus::Creative => {
            has("creative") || has("design") || has("art") || category == "personal"
        }
        Focus::Planning => {
            has("plan") || has("goal") || has("strategy") || priority == Priority::High
        }
        Focus::Execution => {
            has("implement") || has("complete") || has("finish") || priority == Priority::Medium
        }
        Focus::Personal => {
            matches!(category.as_str(), "personal" | "health") || has("family") || has("hobby")
        }
        _ => false,
    }
}

/// Splits `tasks` across one day per theme.
///
/// Days are walked in order. Each day deals its theme-matched and remaining
/// tasks round-robin and keeps only those no earlier day claimed. Tasks still
/// unclaimed afterwards are dealt round-robin from the first day, so every task
/// lands in exactly one `assigned` list. A day left empty while tasks exist gets
/// `tasks[day_idx % len]` as a filler candidate.
pub fn distribute_tasks(tasks: &[Task], themes: &[DailyTheme]) -> Vec<DayAssignment> {
    let total_days = themes.len();
    if total_days <= 1 {
        return themes
            .iter()
            .map(|_| DayAssignment {
                assigned: (0..tasks.len()).collect(),
                filler: None,
            })
            .collect();
    }

    let mut claimed = vec![false; tasks.len()];
    let mut days: Vec<DayAssignment> = themes
        .iter()
        .enumerate()
        .map(|(day_idx, theme)| {
            let assigned: Vec<usize> = round_robin_share(tasks, day_idx, theme.focus, total_days)
                .into_iter()
                .filter(|idx| !std::mem::replace(&mut claimed[*idx], true))
                .collect();
            DayAssignment {
                assigned,
                filler: None,
            }
        })
        .collect();

    let leftovers = claimed
        .iter()
        .enumerate()
        .filter(|(_, taken)| !**taken)
        .map(|(idx, _)| idx);
    for (position, idx) in leftovers.enumerate() {
        days[position % total_days].assigned.push(idx);
    }

    for (day_idx, day) in days.iter_mut().enumerate() {
        if day.assigned.is_empty() && !tasks.is_empty() {
            day.filler = Some(day_idx % tasks.len());
        }
    }

    days
}

/// What `day_idx` would take if its focus decided the whole split.
fn round_robin_share(tasks: &[Task], day_idx: usize, focus: Focus, total_days: usize) -> Vec<usize> {
    let (matched, other): (Vec<usize>, Vec<usize>) =
        (0..tasks.len()).partition(|idx| is_theme_match(&tasks[*idx], focus));

    [matched, other]
        .iter()
        .flat_map(|bucket| {
            bucket
                .iter()
                .enumerate()
                .filter(|(position, _)| position % total_days == day_idx)
                .map(|(_, idx)| *idx)
        })
        .collect()
}

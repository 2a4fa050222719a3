use chrono::NaiveTime;

use crate::models::schedule::{EventPriority, ScheduledEvent};
use crate::models::task::Task;
use crate::models::theme::DailyTheme;
use crate::services::schedule_utils;
use crate::services::work_slots::WorkSlot;

/// Result of packing one day. `placed` and `dropped` are positions in the
/// ranked input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackOutcome {
    pub events: Vec<ScheduledEvent>,
    pub placed: Vec<usize>,
    pub dropped: Vec<usize>,
}

fn task_event(task: &Task, start: u32, theme: &DailyTheme) -> ScheduledEvent {
    ScheduledEvent {
        task_name: task.name.clone(),
        start_time: schedule_utils::to_naive_time(start),
        end_time: schedule_utils::to_naive_time(start + task.duration),
        priority: EventPriority::from(task.priority),
        category: task.category.clone(),
        notes: format!("Duration: {} minutes - {} theme", task.duration, theme.theme),
    }
}

/// Greedy first-fit over the ordered windows.
///
/// A task that overruns the current window moves the cursor to the start of the
/// next one; if it still does not fit there it is skipped and the next task is
/// tried against the same window. Once the windows run out, every remaining
/// task is dropped. Each placement is followed by the theme's buffer. Zero-length
/// tasks are dropped.
pub fn pack_slots(ranked: &[&Task], slots: &[WorkSlot], theme: &DailyTheme) -> PackOutcome {
    let mut outcome = PackOutcome::default();
    let Some(first) = slots.first() else {
        outcome.dropped = (0..ranked.len()).collect();
        return outcome;
    };

    let minutes = |time: NaiveTime| schedule_utils::minutes_from_midnight(time);
    let buffer = theme.work_style.buffer_minutes();
    let mut slot_idx = 0;
    let mut current = minutes(first.start);
    let mut slot_end = minutes(first.end);

    for (position, task) in ranked.iter().enumerate() {
        if task.duration == 0 {
            outcome.dropped.push(position);
            continue;
        }

        if current.saturating_add(task.duration) > slot_end {
            slot_idx += 1;
            let Some(next) = slots.get(slot_idx) else {
                outcome.dropped.extend(position..ranked.len());
                break;
            };
            current = minutes(next.start);
            slot_end = minutes(next.end);

            if current.saturating_add(task.duration) > slot_end {
                outcome.dropped.push(position);
                continue;
            }
        }

        outcome.events.push(task_event(task, current, theme));
        outcome.placed.push(position);
        current = current.saturating_add(task.duration).saturating_add(buffer);
    }

    outcome
}

/// Essentials plus packed tasks, ascending by start time.
pub fn merge_day(mut essentials: Vec<ScheduledEvent>, packed: Vec<ScheduledEvent>) -> Vec<ScheduledEvent> {
    essentials.extend(packed);
    essentials.sort_by_key(|event| event.start_time);
    essentials
}

use crate::models::schedule::ScheduledEvent;
use crate::models::task::Task;
use crate::services::schedule_utils::ring_overlaps;

/// Every validation problem across the task list, in input order.
pub fn validate_tasks(tasks: &[Task]) -> Vec<String> {
    tasks
        .iter()
        .enumerate()
        .flat_map(|(idx, task)| task.validation_errors(idx + 1))
        .collect()
}

/// Pairwise overlap report for one day's events. Intervals ending before they
/// start are treated as crossing midnight.
pub fn detect_schedule_conflicts(events: &[ScheduledEvent]) -> Vec<String> {
    let mut conflicts = Vec::new();
    for (i, first) in events.iter().enumerate() {
        for second in events.iter().skip(i + 1) {
            if ring_overlaps(
                first.start_time,
                first.end_time,
                second.start_time,
                second.end_time,
            ) {
                conflicts.push(format!(
                    "Time conflict between '{}' and '{}'",
                    first.task_name, second.task_name
                ));
            }
        }
    }
    conflicts
}

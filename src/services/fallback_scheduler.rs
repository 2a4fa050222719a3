//! Deterministic multi-day scheduler used whenever the generative path is
//! unavailable or returns something unusable.
//!
//! One call runs `ParseDuration -> BuildDayMetadata -> per day {essentials,
//! windows, distribution, ranking, packing, merge} -> AggregateSummary`. The
//! function is total: every input resolves to a structurally valid schedule.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::models::preferences::SchedulePreferences;
use crate::models::schedule::{DailySummary, DaySchedule, ScheduleResult, ScheduledEvent};
use crate::models::task::Task;
use crate::models::theme::DailyTheme;
use crate::services::day_namer::{day_names, is_weekend};
use crate::services::essential_planner::essential_activities;
use crate::services::schedule_utils::format_hours_minutes;
use crate::services::slot_packer::{merge_day, pack_slots, PackOutcome};
use crate::services::task_distributor::{distribute_tasks, DayAssignment};
use crate::services::task_ranker::rank_indices;
use crate::services::theme_catalog::daily_themes;
use crate::services::work_slots::{work_slots, WorkSlot};

/// Nominal essential time per day reported as `personal_time`.
const ESSENTIAL_MINUTES: u64 = 7 * 60;

struct DayPlan {
    name: String,
    theme: DailyTheme,
    weekend: bool,
    slots: Vec<WorkSlot>,
    assignment: DayAssignment,
    packed: PackOutcome,
}

/// Builds a complete schedule from a snapshot of the task list. Tasks without
/// a name or outside the accepted duration range are left out.
pub fn create_fallback_schedule(tasks: &[Task], preferences: &SchedulePreferences) -> ScheduleResult {
    let tasks = schedulable_tasks(tasks);
    let num_days = preferences.num_days();
    let names = day_names(num_days);
    let themes = daily_themes(num_days);
    let assignments = distribute_tasks(&tasks, &themes);

    info!(
        target: "app::fallback",
        num_days,
        task_count = tasks.len(),
        "building fallback schedule"
    );

    let mut plans: Vec<DayPlan> = names
        .into_iter()
        .zip(themes.iter().copied())
        .zip(assignments)
        .map(|((name, theme), assignment)| {
            let weekend = is_weekend(&name);
            let slots = work_slots(&theme, weekend);
            let packed = pack_indices(&tasks, &assignment.assigned, &slots, &theme);
            DayPlan {
                name,
                theme,
                weekend,
                slots,
                assignment,
                packed,
            }
        })
        .collect();

    place_fillers(&tasks, &mut plans);

    let optimized_schedule: Vec<DaySchedule> = plans
        .into_iter()
        .enumerate()
        .map(|(day_idx, plan)| {
            let essentials: Vec<ScheduledEvent> = essential_activities(&plan.theme, plan.weekend)
                .iter()
                .map(|activity| activity.to_event(&plan.theme))
                .collect();

            debug!(
                target: "app::fallback",
                day = day_idx + 1,
                theme = plan.theme.theme,
                placed = plan.packed.placed.len(),
                dropped = plan.packed.dropped.len(),
                "day packed"
            );

            DaySchedule {
                day: day_idx + 1,
                day_name: plan.name,
                theme: plan.theme.theme.to_string(),
                focus: plan.theme.focus.as_str().to_string(),
                energy_pattern: plan.theme.work_style.as_str().to_string(),
                tasks: merge_day(essentials, plan.packed.events),
            }
        })
        .collect();

    ScheduleResult {
        optimized_schedule,
        daily_summary: summarize(&tasks, &themes),
    }
}

fn schedulable_tasks(tasks: &[Task]) -> Vec<Task> {
    tasks
        .iter()
        .enumerate()
        .filter(|(idx, task)| {
            let keep = task.is_schedulable();
            if !keep {
                warn!(
                    target: "app::fallback",
                    position = idx + 1,
                    duration = task.duration,
                    "skipping task that cannot be scheduled"
                );
            }
            keep
        })
        .map(|(_, task)| task.clone())
        .collect()
}

/// Ranks and packs the given task indices; `placed`/`dropped` come back as
/// indices into `tasks`.
fn pack_indices(tasks: &[Task], indices: &[usize], slots: &[WorkSlot], theme: &DailyTheme) -> PackOutcome {
    let ranked = rank_indices(tasks, indices, theme);
    let ranked_tasks: Vec<&Task> = ranked.iter().map(|idx| &tasks[*idx]).collect();

    let mut outcome = pack_slots(&ranked_tasks, slots, theme);
    outcome.placed = outcome.placed.iter().map(|pos| ranked[*pos]).collect();
    outcome.dropped = outcome.dropped.iter().map(|pos| ranked[*pos]).collect();
    outcome
}

/// A filler is only packed when its task did not land anywhere else, so a task
/// never appears twice across the schedule.
fn place_fillers(tasks: &[Task], plans: &mut [DayPlan]) {
    let mut placed: HashSet<usize> = plans
        .iter()
        .flat_map(|plan| plan.packed.placed.iter().copied())
        .collect();

    for plan in plans.iter_mut() {
        let Some(filler) = plan.assignment.filler else {
            continue;
        };
        if placed.contains(&filler) {
            continue;
        }

        let outcome = pack_indices(tasks, &[filler], &plan.slots, &plan.theme);
        if outcome.placed.contains(&filler) {
            debug!(
                target: "app::fallback",
                task = %tasks[filler].name,
                day = %plan.name,
                "filler task placed on otherwise empty day"
            );
            placed.insert(filler);
            plan.packed = outcome;
        }
    }
}

/// Work time sums every input task, including any the packer dropped.
fn summarize(tasks: &[Task], themes: &[DailyTheme]) -> DailySummary {
    let user_task_minutes: u64 = tasks.iter().map(|task| task.duration as u64).sum();
    let work_hours = user_task_minutes / 60;
    let raw_score = tasks.len() as u64 * 15 + work_hours * 10;

    let daily_themes = themes
        .iter()
        .enumerate()
        .map(|(idx, theme)| theme.description(idx + 1))
        .collect();

    DailySummary {
        total_work_time: format_hours_minutes(user_task_minutes),
        personal_time: format_hours_minutes(ESSENTIAL_MINUTES),
        sleep_time: "8 hours".to_string(),
        meal_time: "2 hours".to_string(),
        exercise_time: "45 minutes".to_string(),
        free_time: "Remaining time for flexibility".to_string(),
        productivity_score: raw_score.min(100) as u8,
        daily_themes,
        recommendations: recommendations(themes.len()),
    }
}

fn recommendations(num_days: usize) -> Vec<String> {
    vec![
        format!("Schedule created for {num_days} days with unique daily themes"),
        "Each day has a distinct focus and energy pattern".to_string(),
        "High-priority tasks matched to appropriate daily themes".to_string(),
        "Consistent meal and sleep times maintained across all days".to_string(),
        "Weekend days have more relaxed schedules with personal focus".to_string(),
        "Task distribution varies by day to prevent repetition".to_string(),
    ]
}

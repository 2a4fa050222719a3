use std::collections::{HashMap, HashSet};

use chrona_app_lib::models::preferences::{SchedulePreferences, MAX_SCHEDULE_DAYS};
use chrona_app_lib::models::schedule::ScheduleResult;
use chrona_app_lib::models::task::{Priority, Task};
use chrona_app_lib::services::day_namer::is_weekend;
use chrona_app_lib::services::essential_planner::essential_activities;
use chrona_app_lib::services::fallback_scheduler::create_fallback_schedule;
use chrona_app_lib::services::schedule_utils::format_clock;
use chrona_app_lib::services::schedule_validator::detect_schedule_conflicts;
use chrona_app_lib::services::task_distributor::distribute_tasks;
use chrona_app_lib::services::theme_catalog::daily_themes;
use chrona_app_lib::services::work_slots::work_slots;

const CURATED_LENGTHS: [usize; 6] = [1, 2, 3, 5, 7, 14];

fn prefs(days: usize) -> SchedulePreferences {
    SchedulePreferences::with_duration(format!("{days} days"))
}

fn mixed_tasks(count: usize) -> Vec<Task> {
    let priorities = [Priority::High, Priority::Medium, Priority::Low];
    let categories = ["work", "personal", "learning", "health", "other"];
    let notes = ["analysis of metrics", "team meeting", "design sketch", "", "finish draft"];

    (0..count)
        .map(|idx| {
            Task::new(
                format!("Task {idx}"),
                30 + (idx as u32 % 4) * 30,
                priorities[idx % priorities.len()],
            )
            .with_category(categories[idx % categories.len()])
            .with_notes(notes[idx % notes.len()])
        })
        .collect()
}

fn placements(result: &ScheduleResult) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for day in &result.optimized_schedule {
        for event in day.user_tasks() {
            *counts.entry(event.task_name.clone()).or_insert(0) += 1;
        }
    }
    counts
}

#[test]
fn returns_exactly_the_requested_number_of_days() {
    for days in CURATED_LENGTHS {
        for count in [0, 1, 4, 12] {
            let result = create_fallback_schedule(&mixed_tasks(count), &prefs(days));
            assert_eq!(result.optimized_schedule.len(), days, "{days} days / {count} tasks");

            for (idx, day) in result.optimized_schedule.iter().enumerate() {
                assert_eq!(day.day, idx + 1);
            }
        }
    }
}

#[test]
fn no_two_events_overlap_on_any_day() {
    for days in CURATED_LENGTHS {
        let result = create_fallback_schedule(&mixed_tasks(20), &prefs(days));
        for day in &result.optimized_schedule {
            let conflicts = detect_schedule_conflicts(&day.tasks);
            assert!(
                conflicts.is_empty(),
                "{} ({}) has conflicts: {conflicts:?}",
                day.day_name,
                day.theme
            );
        }
    }
}

#[test]
fn sleep_wraps_midnight_without_colliding() {
    let result = create_fallback_schedule(&mixed_tasks(6), &prefs(7));
    for day in &result.optimized_schedule {
        let sleep = day
            .essentials()
            .find(|event| event.task_name == "Sleep")
            .expect("every day has sleep");
        assert!(sleep.spans_midnight(), "{} sleep should wrap", day.day_name);
        assert!(sleep.duration_minutes() >= 7 * 60);
    }
}

#[test]
fn assigned_tasks_under_capacity_are_all_placed_once() {
    let days = 5;
    let tasks = mixed_tasks(8);
    let themes = daily_themes(days);
    let assignments = distribute_tasks(&tasks, &themes);
    let result = create_fallback_schedule(&tasks, &prefs(days));

    let mut checked = 0;

    for (day_idx, day) in result.optimized_schedule.iter().enumerate() {
        let theme = &themes[day_idx];
        let assignment = &assignments[day_idx];
        let buffer = theme.work_style.buffer_minutes();
        let demand: u32 = assignment
            .assigned
            .iter()
            .map(|idx| tasks[*idx].duration + buffer)
            .sum();
        // Greedy packing never revisits a window, so only a day whose whole
        // demand fits the opening window is guaranteed to place everything.
        let opening = work_slots(theme, is_weekend(&day.day_name))[0].capacity_minutes();
        if assignment.assigned.is_empty() || demand > opening + buffer {
            continue;
        }
        checked += 1;

        for idx in &assignment.assigned {
            let name = &tasks[*idx].name;
            let hits = day.user_tasks().filter(|event| &event.task_name == name).count();
            assert_eq!(hits, 1, "{name} on {}", day.day_name);
        }
    }

    assert!(checked > 0);
}

#[test]
fn every_day_gets_a_candidate_when_tasks_exist() {
    for days in CURATED_LENGTHS {
        let themes = daily_themes(days);
        for count in [1, 2, 3] {
            let tasks = mixed_tasks(count);
            for (day_idx, assignment) in distribute_tasks(&tasks, &themes).iter().enumerate() {
                assert!(
                    !assignment.candidates().is_empty(),
                    "day {} of {days} with {count} tasks has no candidate",
                    day_idx + 1
                );
            }
        }
    }
}

#[test]
fn mixed_tasks_are_assigned_to_exactly_one_day() {
    for days in [2, 3, 4, 5, 7, 10, 14] {
        let themes = daily_themes(days);
        for count in [3, 8, 13, 29] {
            let tasks = mixed_tasks(count);
            let mut seen = vec![0usize; count];
            for assignment in distribute_tasks(&tasks, &themes) {
                for idx in assignment.assigned {
                    seen[idx] += 1;
                }
            }
            assert!(
                seen.iter().all(|hits| *hits == 1),
                "{days} days / {count} tasks: {seen:?}"
            );

            let result = create_fallback_schedule(&tasks, &prefs(days));
            assert!(
                placements(&result).values().all(|hits| *hits == 1),
                "{days} days / {count} tasks placed a task twice"
            );
        }
    }
}

#[test]
fn high_task_before_two_low_tasks_is_not_duplicated() {
    let tasks = vec![
        Task::new("A", 60, Priority::High).with_category("learning"),
        Task::new("B", 60, Priority::Low).with_category("learning"),
        Task::new("C", 60, Priority::Low).with_category("learning"),
    ];
    let result = create_fallback_schedule(&tasks, &prefs(3));

    let counts = placements(&result);
    assert_eq!(counts.len(), 3);
    assert!(counts.values().all(|hits| *hits == 1), "{counts:?}");
}

#[test]
fn absurd_day_count_is_capped() {
    for raw in ["18446744073709551615 days", "100000000 days", "15 days"] {
        let preferences = SchedulePreferences::with_duration(raw);
        let result = create_fallback_schedule(&mixed_tasks(4), &preferences);
        assert_eq!(result.optimized_schedule.len(), MAX_SCHEDULE_DAYS, "{raw}");
    }
}

#[test]
fn out_of_range_durations_are_never_packed() {
    let tasks = vec![
        Task::new("Blink", 0, Priority::High),
        Task::new("Forever", u32::MAX, Priority::High),
        Task::new("Marathon", 481, Priority::Medium),
        Task::new("Write report", 60, Priority::Low),
    ];

    for days in [1, 3, 7] {
        let result = create_fallback_schedule(&tasks, &prefs(days));
        let counts = placements(&result);
        assert_eq!(counts.get("Write report"), Some(&1), "{days} days");
        assert_eq!(counts.len(), 1, "{days} days: {counts:?}");

        for day in &result.optimized_schedule {
            assert!(day.user_tasks().all(|event| event.duration_minutes() > 0));
        }
    }
}

#[test]
fn curated_lengths_have_unique_themes() {
    for days in [3, 5, 7, 14] {
        let result = create_fallback_schedule(&mixed_tasks(3), &prefs(days));
        let themes: HashSet<&str> = result
            .optimized_schedule
            .iter()
            .map(|day| day.theme.as_str())
            .collect();
        assert_eq!(themes.len(), days, "{days}-day themes repeat");
    }
}

#[test]
fn identical_inputs_produce_identical_schedules() {
    let tasks = mixed_tasks(9);
    let preferences = prefs(7);

    let first = create_fallback_schedule(&tasks, &preferences);
    let second = create_fallback_schedule(&tasks, &preferences);

    for (a, b) in first
        .optimized_schedule
        .iter()
        .zip(second.optimized_schedule.iter())
    {
        let times = |day: &chrona_app_lib::models::schedule::DaySchedule| {
            day.essentials()
                .map(|event| (event.task_name.clone(), event.start_time, event.end_time))
                .collect::<Vec<_>>()
        };
        assert_eq!(times(a), times(b));
    }
    assert_eq!(first, second);
}

#[test]
fn unparseable_duration_falls_back_to_one_day() {
    let preferences = SchedulePreferences::with_duration("garbage");
    let result = create_fallback_schedule(&mixed_tasks(2), &preferences);

    assert_eq!(result.optimized_schedule.len(), 1);
    assert_eq!(result.optimized_schedule[0].day_name, "Today");
}

#[test]
fn empty_request_yields_essential_only_today() {
    let result = create_fallback_schedule(&[], &SchedulePreferences::default());

    assert_eq!(result.optimized_schedule.len(), 1);
    let today = &result.optimized_schedule[0];
    assert_eq!(today.day_name, "Today");
    assert_eq!(today.user_tasks().count(), 0);

    let names: HashSet<&str> = today.tasks.iter().map(|e| e.task_name.as_str()).collect();
    for expected in [
        "Sleep",
        "Morning routine",
        "Breakfast",
        "Lunch",
        "Exercise",
        "Dinner",
        "Personal/Family time",
        "Evening routine",
    ] {
        assert!(names.contains(expected), "missing {expected}");
    }

    let sleep = today
        .tasks
        .iter()
        .find(|event| event.task_name == "Sleep")
        .expect("sleep");
    assert_eq!(format_clock(sleep.start_time), "23:00");
    assert_eq!(format_clock(sleep.end_time), "07:00");
}

#[test]
fn single_task_workweek_lands_on_exactly_one_day() {
    let tasks = vec![Task::new("Write report", 120, Priority::High).with_category("work")];
    let preferences = SchedulePreferences::with_duration("5 days (Workweek)");
    let result = create_fallback_schedule(&tasks, &preferences);

    assert_eq!(result.optimized_schedule.len(), 5);
    let themes: HashSet<&str> = result
        .optimized_schedule
        .iter()
        .map(|day| day.theme.as_str())
        .collect();
    assert_eq!(themes.len(), 5);

    assert_eq!(placements(&result).get("Write report"), Some(&1));

    let catalog = daily_themes(5);
    let (day_idx, day) = result
        .optimized_schedule
        .iter()
        .enumerate()
        .find(|(_, day)| day.user_tasks().next().is_some())
        .expect("task placed");
    let event = day.user_tasks().next().expect("event");

    let slot = work_slots(&catalog[day_idx], false)
        .into_iter()
        .find(|slot| slot.capacity_minutes() >= 120)
        .expect("a slot fits two hours");
    assert_eq!(event.start_time, slot.start);
    assert_eq!(event.duration_minutes(), 120);
}

#[test]
fn full_week_uses_weekend_timing_and_never_duplicates() {
    let tasks = mixed_tasks(10);
    let result = create_fallback_schedule(&tasks, &prefs(7));
    let catalog = daily_themes(7);

    assert_eq!(result.optimized_schedule.len(), 7);
    assert!(result.scheduled_task_count() <= 10);
    assert!(placements(&result).values().all(|count| *count == 1));

    for (idx, day) in result.optimized_schedule.iter().enumerate() {
        let weekend = matches!(day.day_name.as_str(), "Saturday" | "Sunday");
        let expected: Vec<_> = essential_activities(&catalog[idx], weekend)
            .iter()
            .map(|activity| (activity.name.to_string(), activity.start))
            .collect();
        let mut actual: Vec<_> = day
            .essentials()
            .map(|event| (event.task_name.clone(), event.start_time))
            .collect();
        let mut expected_sorted = expected.clone();
        actual.sort();
        expected_sorted.sort();
        assert_eq!(actual, expected_sorted, "{}", day.day_name);

        if weekend {
            assert!(day
                .essentials()
                .any(|event| event.task_name == "Exercise/Outdoor activity"));
        }
    }
}

#[test]
fn reported_work_time_counts_dropped_tasks() {
    let tasks: Vec<Task> = (0..5)
        .map(|idx| Task::new(format!("Marathon {idx}"), 480, Priority::Medium))
        .collect();
    let result = create_fallback_schedule(&tasks, &SchedulePreferences::default());

    assert_eq!(result.daily_summary.total_work_time, "40 hours 0 minutes");
    assert!(result.scheduled_task_minutes() < 5 * 480);
    assert!(result.scheduled_task_count() < tasks.len());
}

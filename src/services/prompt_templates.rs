use serde_json::{json, Value as JsonValue};

use crate::models::preferences::{SchedulePreferences, MAX_FLEXIBILITY, MIN_FLEXIBILITY};
use crate::models::task::Task;
use crate::services::day_namer::schedule_description;
use crate::services::theme_catalog::daily_themes;

/// Task list as the generative service sees it.
pub fn build_task_payload(tasks: &[Task]) -> JsonValue {
    JsonValue::Array(
        tasks
            .iter()
            .map(|task| {
                json!({
                    "name": task.name,
                    "duration_minutes": task.duration,
                    "priority": task.priority.as_str(),
                    "category": task.category,
                    "preferred_time": task.preferred_time.as_str(),
                    "notes": task.notes,
                    "deadline": task.deadline.map(|date| date.to_string()),
                })
            })
            .collect(),
    )
}

fn optional(value: &Option<String>, default: &str) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Full instruction text for one schedule request.
pub fn build_schedule_prompt(tasks: &[Task], preferences: &SchedulePreferences) -> String {
    let num_days = preferences.num_days();
    let description = schedule_description(num_days);
    let task_json = serde_json::to_string_pretty(&build_task_payload(tasks))
        .unwrap_or_else(|_| "[]".to_string());

    let theme_lines = daily_themes(num_days)
        .iter()
        .enumerate()
        .map(|(idx, theme)| {
            format!(
                "Day {}: {} - Focus on {} work in a {} style",
                idx + 1,
                theme.theme,
                theme.focus.as_str(),
                theme.work_style.as_str()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let request = preferences
        .user_schedule_request
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| format!("\n=== USER REQUEST ===\n{text}\n"))
        .unwrap_or_default();

    format!(
        r#"You are Chrona AI, an expert schedule optimization system. Create a {num_days}-day schedule for a {description} that maximizes productivity while keeping work-life balance.

=== TECHNICAL REQUIREMENTS ===
1. TIME FORMAT: only HH:MM between 00:00 and 23:59. Never use 24:00; use 00:00 for midnight.
2. No overlapping events within a day.
3. Keep every task at exactly the duration given.
4. Produce {num_days} separate daily schedules.

=== USER TASKS ===
{task_json}

=== DAILY THEMES ===
{theme_lines}

=== PREFERENCES ===
Peak hours: {peak}
Break time: {breaks}
Work type: {work_type}
Flexibility (1-5): {flexibility}
{request}
=== RESPONSE FORMAT ===
Respond with a single JSON object:
{{
  "optimized_schedule": [
    {{"day": 1, "day_name": string, "theme": string, "focus": string, "energy_pattern": string,
      "tasks": [{{"task_name": string, "start_time": "HH:MM", "end_time": "HH:MM",
                 "priority": "high|medium|low|essential", "category": string, "notes": string}}]}}
  ],
  "daily_summary": {{"total_work_time": string, "personal_time": string, "sleep_time": string,
                    "meal_time": string, "exercise_time": string, "free_time": string,
                    "productivity_score": number, "daily_themes": [string], "recommendations": [string]}}
}}
"#,
        peak = optional(&preferences.peak_hours, "No preference"),
        breaks = optional(&preferences.break_time, "Standard"),
        work_type = optional(&preferences.work_type, "Mixed"),
        flexibility = preferences.flexibility.clamp(MIN_FLEXIBILITY, MAX_FLEXIBILITY),
    )
}

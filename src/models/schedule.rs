use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::task::Priority;
use crate::services::schedule_utils::{self, clock_format};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EventPriority {
    High,
    Medium,
    Low,
    Essential,
}

impl From<Priority> for EventPriority {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::High => EventPriority::High,
            Priority::Medium => EventPriority::Medium,
            Priority::Low => EventPriority::Low,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledEvent {
    pub task_name: String,
    #[serde(with = "clock_format")]
    pub start_time: NaiveTime,
    #[serde(with = "clock_format")]
    pub end_time: NaiveTime,
    pub priority: EventPriority,
    pub category: String,
    #[serde(default)]
    pub notes: String,
}

impl ScheduledEvent {
    pub fn is_essential(&self) -> bool {
        self.priority == EventPriority::Essential
    }

    /// Wall-clock length; events ending before they start wrap past midnight.
    pub fn duration_minutes(&self) -> i64 {
        schedule_utils::ring_duration_minutes(self.start_time, self.end_time)
    }

    pub fn spans_midnight(&self) -> bool {
        self.end_time < self.start_time
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaySchedule {
    pub day: usize,
    pub day_name: String,
    pub theme: String,
    pub focus: String,
    pub energy_pattern: String,
    pub tasks: Vec<ScheduledEvent>,
}

impl DaySchedule {
    pub fn user_tasks(&self) -> impl Iterator<Item = &ScheduledEvent> {
        self.tasks.iter().filter(|event| !event.is_essential())
    }

    pub fn essentials(&self) -> impl Iterator<Item = &ScheduledEvent> {
        self.tasks.iter().filter(|event| event.is_essential())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySummary {
    pub total_work_time: String,
    pub personal_time: String,
    pub sleep_time: String,
    pub meal_time: String,
    pub exercise_time: String,
    #[serde(default)]
    pub free_time: String,
    pub productivity_score: u8,
    #[serde(default)]
    pub daily_themes: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleResult {
    pub optimized_schedule: Vec<DaySchedule>,
    pub daily_summary: DailySummary,
}

impl ScheduleResult {
    /// Minutes of user tasks that actually made it into the timetable.
    pub fn scheduled_task_minutes(&self) -> i64 {
        self.optimized_schedule
            .iter()
            .flat_map(|day| day.user_tasks())
            .map(ScheduledEvent::duration_minutes)
            .sum()
    }

    pub fn scheduled_task_count(&self) -> usize {
        self.optimized_schedule
            .iter()
            .map(|day| day.user_tasks().count())
            .sum()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ScheduleSource {
    Ai,
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationOutcome {
    pub source: ScheduleSource,
    pub schedule: ScheduleResult,
}

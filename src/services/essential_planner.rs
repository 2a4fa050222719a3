use chrono::NaiveTime;

use crate::models::schedule::{EventPriority, ScheduledEvent};
use crate::models::theme::DailyTheme;
use crate::services::day_profile::DayProfile;
use crate::services::schedule_utils::{self, MINUTES_PER_DAY};

pub const MORNING_ROUTINE: &str = "Morning routine";
pub const EVENING_ROUTINE: &str = "Evening routine";
pub const SLEEP: &str = "Sleep";

/// A fixed block of the daily skeleton. End time is derived from the duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EssentialActivity {
    pub name: &'static str,
    pub start: NaiveTime,
    pub duration_minutes: u32,
    pub category: &'static str,
}

impl EssentialActivity {
    pub fn end(&self) -> NaiveTime {
        schedule_utils::add_minutes(self.start, self.duration_minutes)
    }

    pub fn to_event(&self, theme: &DailyTheme) -> ScheduledEvent {
        ScheduledEvent {
            task_name: self.name.to_string(),
            start_time: self.start,
            end_time: self.end(),
            priority: EventPriority::Essential,
            category: self.category.to_string(),
            notes: format!("Essential activity - {} theme", theme.theme),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Block {
    name: &'static str,
    start: u32,
    minutes: u32,
    category: &'static str,
}

const fn at(hour: u32, minute: u32) -> u32 {
    hour * 60 + minute
}

const fn block(name: &'static str, start: u32, minutes: u32, category: &'static str) -> Block {
    Block {
        name,
        start,
        minutes,
        category,
    }
}

fn weekday_blocks(profile: DayProfile) -> [Block; 7] {
    // morning, breakfast, lunch, exercise, dinner, personal, evening
    let (morning, breakfast, lunch, exercise, dinner, personal) = match profile {
        DayProfile::Intensive => (
            (at(6, 30), 30),
            (at(7, 0), 30),
            (at(12, 0), 30),
            (at(18, 30), 60),
            (at(19, 30), 45),
            (at(20, 15), 135),
        ),
        DayProfile::Interactive => (
            (at(7, 0), 30),
            (at(7, 30), 30),
            (at(13, 0), 60),
            (at(17, 30), 45),
            (at(19, 0), 45),
            (at(20, 0), 120),
        ),
        DayProfile::Innovative => (
            (at(7, 30), 30),
            (at(8, 0), 45),
            (at(12, 30), 45),
            (at(17, 0), 60),
            (at(19, 0), 45),
            (at(20, 0), 120),
        ),
        _ => (
            (at(7, 0), 30),
            (at(7, 30), 30),
            (at(12, 30), 45),
            (at(18, 0), 45),
            (at(19, 0), 45),
            (at(20, 0), 120),
        ),
    };

    [
        block(MORNING_ROUTINE, morning.0, morning.1, "personal"),
        block("Breakfast", breakfast.0, breakfast.1, "meals"),
        block("Lunch", lunch.0, lunch.1, "meals"),
        block("Exercise", exercise.0, exercise.1, "health"),
        block("Dinner", dinner.0, dinner.1, "meals"),
        block("Personal/Family time", personal.0, personal.1, "personal"),
        block(EVENING_ROUTINE, at(22, 30), 30, "personal"),
    ]
}

fn weekend_blocks(profile: DayProfile) -> [Block; 7] {
    match profile {
        DayProfile::WeekendRelaxed => [
            block(MORNING_ROUTINE, at(8, 30), 45, "personal"),
            block("Breakfast", at(9, 15), 60, "meals"),
            block("Lunch", at(12, 45), 75, "meals"),
            block("Exercise/Outdoor activity", at(16, 0), 90, "health"),
            block("Dinner", at(19, 30), 75, "meals"),
            block("Personal/Family time", at(21, 0), 135, "personal"),
            block(EVENING_ROUTINE, at(23, 15), 30, "personal"),
        ],
        _ => {
            let outdoor = match profile {
                DayProfile::WeekendStandard {
                    extended_outdoor: true,
                } => 120,
                _ => 90,
            };
            [
                block(MORNING_ROUTINE, at(8, 0), 30, "personal"),
                block("Breakfast", at(8, 30), 45, "meals"),
                block("Lunch", at(13, 0), 60, "meals"),
                block("Exercise/Outdoor activity", at(16, 0), outdoor, "health"),
                block("Dinner", at(19, 0), 60, "meals"),
                block("Personal/Family time", at(20, 30), 150, "personal"),
                block(EVENING_ROUTINE, at(23, 0), 30, "personal"),
            ]
        }
    }
}

/// Daily skeleton for the given theme, ordered by start time, with sleep last.
///
/// Sleep runs from the end of the evening routine to the start of the morning
/// routine and therefore wraps past midnight.
pub fn essential_activities(theme: &DailyTheme, is_weekend: bool) -> Vec<EssentialActivity> {
    let profile = DayProfile::resolve(theme, is_weekend);
    let blocks = if profile.is_weekend() {
        weekend_blocks(profile)
    } else {
        weekday_blocks(profile)
    };

    let mut activities: Vec<EssentialActivity> = blocks
        .iter()
        .map(|block| EssentialActivity {
            name: block.name,
            start: schedule_utils::to_naive_time(block.start),
            duration_minutes: block.minutes,
            category: block.category,
        })
        .collect();

    let wake = blocks[0].start;
    let evening = blocks[blocks.len() - 1];
    let bedtime = (evening.start + evening.minutes) % MINUTES_PER_DAY;
    activities.push(EssentialActivity {
        name: SLEEP,
        start: schedule_utils::to_naive_time(bedtime),
        duration_minutes: (wake + MINUTES_PER_DAY - bedtime) % MINUTES_PER_DAY,
        category: "sleep",
    });

    activities
}

use chrono::NaiveTime;

use crate::models::theme::DailyTheme;
use crate::services::day_profile::DayProfile;
use crate::services::schedule_utils;

/// Open window for user tasks, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl WorkSlot {
    fn from_minutes(start: u32, end: u32) -> Self {
        Self {
            start: schedule_utils::to_naive_time(start),
            end: schedule_utils::to_naive_time(end),
        }
    }

    pub fn capacity_minutes(&self) -> u32 {
        schedule_utils::minutes_from_midnight(self.end)
            .saturating_sub(schedule_utils::minutes_from_midnight(self.start))
    }
}

const fn at(hour: u32, minute: u32) -> u32 {
    hour * 60 + minute
}

fn windows(profile: DayProfile) -> [(u32, u32); 2] {
    match profile {
        DayProfile::WeekendRelaxed => [(at(10, 30), at(12, 0)), (at(14, 30), at(15, 30))],
        DayProfile::WeekendStandard { .. } => [(at(10, 0), at(12, 30)), (at(14, 0), at(16, 0))],
        DayProfile::Intensive => [(at(8, 0), at(11, 30)), (at(13, 0), at(17, 30))],
        DayProfile::Interactive => [(at(8, 30), at(11, 0)), (at(14, 0), at(17, 0))],
        DayProfile::Innovative => [(at(9, 0), at(12, 0)), (at(13, 30), at(16, 30))],
        DayProfile::Standard => [(at(8, 0), at(12, 30)), (at(13, 15), at(17, 30))],
    }
}

/// Morning and afternoon windows available for user tasks, in order.
pub fn work_slots(theme: &DailyTheme, is_weekend: bool) -> Vec<WorkSlot> {
    windows(DayProfile::resolve(theme, is_weekend))
        .iter()
        .map(|(start, end)| WorkSlot::from_minutes(*start, *end))
        .collect()
}

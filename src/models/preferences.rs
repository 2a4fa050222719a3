use std::num::IntErrorKind;

use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_SCHEDULE_DURATION: &str = "1 day (Single day)";
/// Longest plan the planner offers (two weeks).
pub const MAX_SCHEDULE_DAYS: usize = 14;
pub const MIN_FLEXIBILITY: u8 = 1;
pub const MAX_FLEXIBILITY: u8 = 5;

/// Options collected from the planner form. Only `schedule_duration` drives the
/// fallback engine; the rest shape the generative prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchedulePreferences {
    #[serde(default = "default_schedule_duration")]
    pub schedule_duration: String,
    #[serde(default)]
    pub peak_hours: Option<String>,
    #[serde(default)]
    pub break_time: Option<String>,
    #[serde(default)]
    pub work_type: Option<String>,
    #[serde(default = "default_flexibility", deserialize_with = "deserialize_flexibility")]
    pub flexibility: u8,
    #[serde(default)]
    pub user_schedule_request: Option<String>,
}

fn default_schedule_duration() -> String {
    DEFAULT_SCHEDULE_DURATION.to_string()
}

fn default_flexibility() -> u8 {
    3
}

/// Accepts any number and clamps it onto the 1-5 scale.
fn deserialize_flexibility<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() {
        return Ok(default_flexibility());
    }
    let clamped = raw
        .round()
        .clamp(f64::from(MIN_FLEXIBILITY), f64::from(MAX_FLEXIBILITY));
    Ok(clamped as u8)
}

impl Default for SchedulePreferences {
    fn default() -> Self {
        Self {
            schedule_duration: default_schedule_duration(),
            peak_hours: None,
            break_time: None,
            work_type: None,
            flexibility: default_flexibility(),
            user_schedule_request: None,
        }
    }
}

impl SchedulePreferences {
    pub fn with_duration(duration: impl Into<String>) -> Self {
        Self {
            schedule_duration: duration.into(),
            ..Self::default()
        }
    }

    /// Day count taken from the leading integer of `schedule_duration`
    /// ("7 days (Full week)" -> 7). Falls back to 1 and is capped at
    /// `MAX_SCHEDULE_DAYS`.
    pub fn num_days(&self) -> usize {
        parse_schedule_duration(&self.schedule_duration)
    }
}

pub fn parse_schedule_duration(raw: &str) -> usize {
    let Some(token) = raw.split_whitespace().next() else {
        return 1;
    };
    match token.parse::<usize>() {
        Ok(0) => 1,
        Ok(days) => days.min(MAX_SCHEDULE_DAYS),
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => MAX_SCHEDULE_DAYS,
        Err(_) => 1,
    }
}

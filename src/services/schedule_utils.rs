use chrono::{NaiveTime, Timelike};
use serde_json::json;

use crate::error::{AppError, AppResult};

pub const MINUTES_PER_DAY: u32 = 24 * 60;
const CLOCK_FORMAT: &str = "%H:%M";

pub fn parse_clock(value: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), CLOCK_FORMAT).map_err(|err| {
        AppError::validation_with_details(
            "Invalid clock time",
            json!({"value": value, "error": err.to_string()}),
        )
    })
}

pub fn format_clock(time: NaiveTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}

pub fn minutes_from_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Clock time for a minute offset, wrapping past midnight so `24:00` never appears.
pub fn to_naive_time(total_minutes: u32) -> NaiveTime {
    let wrapped = total_minutes % MINUTES_PER_DAY;
    NaiveTime::from_hms_opt(wrapped / 60, wrapped % 60, 0).unwrap_or(NaiveTime::MIN)
}

pub fn add_minutes(time: NaiveTime, minutes: u32) -> NaiveTime {
    to_naive_time(minutes_from_midnight(time) + minutes % MINUTES_PER_DAY)
}

/// Length of `[start, end)` on the 24h ring. `end < start` wraps past midnight;
/// `end == start` is empty.
pub fn ring_duration_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    let start = minutes_from_midnight(start) as i64;
    let end = minutes_from_midnight(end) as i64;
    if end >= start {
        end - start
    } else {
        end + MINUTES_PER_DAY as i64 - start
    }
}

/// Same-day overlap of two half-open intervals.
pub fn overlaps(a_start: NaiveTime, a_end: NaiveTime, b_start: NaiveTime, b_end: NaiveTime) -> bool {
    a_start < b_end && b_start < a_end
}

/// Projects an interval onto `[0, 1440)`, splitting it at midnight when it wraps.
pub fn ring_segments(start: NaiveTime, end: NaiveTime) -> Vec<(u32, u32)> {
    let start = minutes_from_midnight(start);
    let end = minutes_from_midnight(end);
    if end > start {
        vec![(start, end)]
    } else if end < start {
        let mut segments = vec![(start, MINUTES_PER_DAY)];
        if end > 0 {
            segments.push((0, end));
        }
        segments
    } else {
        Vec::new()
    }
}

/// Overlap test that understands intervals crossing midnight.
pub fn ring_overlaps(a_start: NaiveTime, a_end: NaiveTime, b_start: NaiveTime, b_end: NaiveTime) -> bool {
    let a = ring_segments(a_start, a_end);
    let b = ring_segments(b_start, b_end);
    a.iter()
        .any(|(a0, a1)| b.iter().any(|(b0, b1)| a0 < b1 && b0 < a1))
}

pub fn format_hours_minutes(total_minutes: u64) -> String {
    format!("{} hours {} minutes", total_minutes / 60, total_minutes % 60)
}

/// `#[serde(with = "clock_format")]` for `HH:MM` fields.
pub mod clock_format {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_clock(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(raw.trim(), super::CLOCK_FORMAT).map_err(de::Error::custom)
    }
}

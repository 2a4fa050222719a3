const WEEK: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Display labels for an `num_days`-long schedule.
pub fn day_names(num_days: usize) -> Vec<String> {
    let labels: Vec<&str> = match num_days {
        1 => vec!["Today"],
        2 => vec!["Saturday", "Sunday"],
        3 => vec!["Friday", "Saturday", "Sunday"],
        5 => WEEK[..5].to_vec(),
        7 => WEEK.to_vec(),
        14 => WEEK.iter().chain(WEEK.iter()).copied().collect(),
        _ => return (1..=num_days).map(|day| format!("Day {day}")).collect(),
    };
    labels.into_iter().map(str::to_string).collect()
}

pub fn is_weekend(day_name: &str) -> bool {
    matches!(day_name, "Saturday" | "Sunday")
}

/// Prompt wording for the schedule length.
pub fn schedule_description(num_days: usize) -> String {
    match num_days {
        1 => "single day".to_string(),
        2 => "weekend (Saturday & Sunday)".to_string(),
        3 => "long weekend (Friday, Saturday & Sunday)".to_string(),
        5 => "workweek (Monday to Friday)".to_string(),
        7 => "full week (Monday to Sunday)".to_string(),
        14 => "two weeks (14 days)".to_string(),
        other => format!("{other} days"),
    }
}

use crate::models::theme::{DailyTheme, Focus, WorkStyle};

const BALANCED: DailyTheme = DailyTheme::new("Balanced", Focus::Mixed, WorkStyle::Steady);

const THREE_DAY: [DailyTheme; 3] = [
    DailyTheme::new("Deep Focus", Focus::Analytical, WorkStyle::Intensive),
    DailyTheme::new("Communication", Focus::Meetings, WorkStyle::Interactive),
    DailyTheme::new("Creative & Personal", Focus::Creative, WorkStyle::Relaxed),
];

const WORKWEEK: [DailyTheme; 5] = [
    DailyTheme::new("Strategic Monday", Focus::Planning, WorkStyle::Organized),
    DailyTheme::new("Deep Work Tuesday", Focus::Analytical, WorkStyle::Intensive),
    DailyTheme::new(
        "Communication Wednesday",
        Focus::Meetings,
        WorkStyle::Interactive,
    ),
    DailyTheme::new(
        "Implementation Thursday",
        Focus::Execution,
        WorkStyle::Productive,
    ),
    DailyTheme::new("Creative Friday", Focus::Creative, WorkStyle::Innovative),
];

const WEEKEND: [DailyTheme; 2] = [
    DailyTheme::new("Personal Saturday", Focus::Personal, WorkStyle::Leisurely),
    DailyTheme::new("Reflection Sunday", Focus::Review, WorkStyle::Peaceful),
];

const SECOND_WEEK: [DailyTheme; 7] = [
    DailyTheme::new(
        "Innovation Monday",
        Focus::Experimental,
        WorkStyle::Exploratory,
    ),
    DailyTheme::new("Analysis Tuesday", Focus::Review, WorkStyle::Thorough),
    DailyTheme::new(
        "Collaboration Wednesday",
        Focus::Teamwork,
        WorkStyle::Synergistic,
    ),
    DailyTheme::new("Results Thursday", Focus::Completion, WorkStyle::Decisive),
    DailyTheme::new("Learning Friday", Focus::Skills, WorkStyle::Developmental),
    DailyTheme::new("Adventure Saturday", Focus::Exploration, WorkStyle::Dynamic),
    DailyTheme::new("Integration Sunday", Focus::Synthesis, WorkStyle::Visionary),
];

fn full_week() -> Vec<DailyTheme> {
    WORKWEEK.iter().chain(WEEKEND.iter()).copied().collect()
}

/// One theme per day. Lengths outside the curated set cycle the weekly pattern.
pub fn daily_themes(num_days: usize) -> Vec<DailyTheme> {
    match num_days {
        0..=2 => vec![BALANCED; num_days],
        3 => THREE_DAY.to_vec(),
        5 => WORKWEEK.to_vec(),
        7 => full_week(),
        14 => {
            let mut themes = full_week();
            themes.extend_from_slice(&SECOND_WEEK);
            themes
        }
        _ => {
            let week = full_week();
            (0..num_days).map(|idx| week[idx % week.len()]).collect()
        }
    }
}

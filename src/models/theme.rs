use serde::{Serialize, Serializer};

/// Keyword a day is organised around; drives task affinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    Mixed,
    Analytical,
    Meetings,
    Creative,
    Planning,
    Execution,
    Personal,
    Review,
    Experimental,
    Teamwork,
    Completion,
    Skills,
    Exploration,
    Synthesis,
}

impl Focus {
    pub fn as_str(self) -> &'static str {
        match self {
            Focus::Mixed => "Mixed tasks",
            Focus::Analytical => "analytical",
            Focus::Meetings => "meetings",
            Focus::Creative => "creative",
            Focus::Planning => "planning",
            Focus::Execution => "execution",
            Focus::Personal => "personal",
            Focus::Review => "review",
            Focus::Experimental => "experimental",
            Focus::Teamwork => "teamwork",
            Focus::Completion => "completion",
            Focus::Skills => "skills",
            Focus::Exploration => "exploration",
            Focus::Synthesis => "synthesis",
        }
    }
}

/// Energy / work-style descriptor of a day. Selects essential-activity timing
/// and work windows on weekdays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkStyle {
    Steady,
    Intensive,
    Interactive,
    Relaxed,
    Organized,
    Productive,
    Innovative,
    Leisurely,
    Peaceful,
    Exploratory,
    Thorough,
    Synergistic,
    Decisive,
    Developmental,
    Dynamic,
    Visionary,
}

impl WorkStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkStyle::Steady => "steady",
            WorkStyle::Intensive => "intensive",
            WorkStyle::Interactive => "interactive",
            WorkStyle::Relaxed => "relaxed",
            WorkStyle::Organized => "organized",
            WorkStyle::Productive => "productive",
            WorkStyle::Innovative => "innovative",
            WorkStyle::Leisurely => "leisurely",
            WorkStyle::Peaceful => "peaceful",
            WorkStyle::Exploratory => "exploratory",
            WorkStyle::Thorough => "thorough",
            WorkStyle::Synergistic => "synergistic",
            WorkStyle::Decisive => "decisive",
            WorkStyle::Developmental => "developmental",
            WorkStyle::Dynamic => "dynamic",
            WorkStyle::Visionary => "visionary",
        }
    }

    /// Gap left after each packed task.
    pub fn buffer_minutes(self) -> u32 {
        match self {
            WorkStyle::Intensive => 15,
            _ => 10,
        }
    }
}

impl Serialize for Focus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for WorkStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DailyTheme {
    pub theme: &'static str,
    pub focus: Focus,
    pub work_style: WorkStyle,
}

impl DailyTheme {
    pub const fn new(theme: &'static str, focus: Focus, work_style: WorkStyle) -> Self {
        Self {
            theme,
            focus,
            work_style,
        }
    }

    pub fn description(&self, day: usize) -> String {
        format!("Day {day}: {} - {} focus", self.theme, self.focus.as_str())
    }
}

use crate::models::theme::{DailyTheme, Focus, WorkStyle};

/// Timing variant shared by the essential-activity and work-window tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayProfile {
    /// Weekend with a personal focus: later mornings, short work windows.
    WeekendRelaxed,
    /// Any other weekend day. `extended_outdoor` lengthens the outdoor block.
    WeekendStandard { extended_outdoor: bool },
    Intensive,
    Interactive,
    Innovative,
    Standard,
}

impl DayProfile {
    pub fn resolve(theme: &DailyTheme, is_weekend: bool) -> Self {
        if is_weekend {
            return match theme.focus {
                Focus::Personal => DayProfile::WeekendRelaxed,
                focus => DayProfile::WeekendStandard {
                    extended_outdoor: focus == Focus::Exploration,
                },
            };
        }

        match theme.work_style {
            WorkStyle::Intensive => DayProfile::Intensive,
            WorkStyle::Interactive => DayProfile::Interactive,
            WorkStyle::Innovative => DayProfile::Innovative,
            _ => DayProfile::Standard,
        }
    }

    pub fn is_weekend(self) -> bool {
        matches!(
            self,
            DayProfile::WeekendRelaxed | DayProfile::WeekendStandard { .. }
        )
    }
}

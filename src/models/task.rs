use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MIN_TASK_MINUTES: u32 = 15;
pub const MAX_TASK_MINUTES: u32 = 480;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Lower ranks sort first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PreferredTime {
    #[default]
    NoPreference,
    Morning,
    Afternoon,
    Evening,
}

impl PreferredTime {
    pub fn as_str(self) -> &'static str {
        match self {
            PreferredTime::NoPreference => "No preference",
            PreferredTime::Morning => "Morning",
            PreferredTime::Afternoon => "Afternoon",
            PreferredTime::Evening => "Evening",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub name: String,
    /// Minutes.
    pub duration: u32,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub preferred_time: PreferredTime,
}

fn default_category() -> String {
    "other".to_string()
}

impl Task {
    pub fn new(name: impl Into<String>, duration: u32, priority: Priority) -> Self {
        Self {
            name: name.into().trim().to_string(),
            duration,
            priority,
            category: default_category(),
            notes: String::new(),
            deadline: None,
            preferred_time: PreferredTime::NoPreference,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Every problem with this task. `position` is its 1-based place in the
    /// list, used to label unnamed tasks.
    pub fn validation_errors(&self, position: usize) -> Vec<String> {
        let name = self.name.trim();
        let label = if name.is_empty() {
            format!("Task {position}")
        } else {
            name.to_string()
        };

        let mut errors = Vec::new();
        if name.is_empty() {
            errors.push(format!("Task {position} has no name"));
        }
        if self.duration < MIN_TASK_MINUTES {
            errors.push(format!("Task '{label}' duration is too short"));
        }
        if self.duration > MAX_TASK_MINUTES {
            errors.push(format!("Task '{label}' duration is too long"));
        }
        errors
    }

    /// Named and within `[MIN_TASK_MINUTES, MAX_TASK_MINUTES]`.
    pub fn is_schedulable(&self) -> bool {
        !self.name.trim().is_empty()
            && (MIN_TASK_MINUTES..=MAX_TASK_MINUTES).contains(&self.duration)
    }

    pub(crate) fn category_lower(&self) -> String {
        self.category.to_lowercase()
    }

    pub(crate) fn notes_lower(&self) -> String {
        self.notes.to_lowercase()
    }
}

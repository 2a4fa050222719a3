use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::preferences::SchedulePreferences;
use crate::models::schedule::{
    OptimizationOutcome, ScheduleResult, ScheduleSource, ScheduledEvent,
};
use crate::models::task::Task;
use crate::services::fallback_scheduler::create_fallback_schedule;
use crate::services::genai_service::ScheduleGenerator;
use crate::services::prompt_templates::build_schedule_prompt;
use crate::services::schedule_validator;

static JSON_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("valid JSON object pattern"));

/// Pulls the outermost `{...}` out of model text and parses it as a schedule.
pub fn extract_schedule_json(text: &str) -> Option<ScheduleResult> {
    let candidate = JSON_OBJECT.find(text)?.as_str();
    match serde_json::from_str::<ScheduleResult>(candidate) {
        Ok(schedule) => Some(schedule),
        Err(err) => {
            debug!(target: "app::optimizer", error = %err, "model output is not a schedule");
            None
        }
    }
}

/// Coordinates the generative path and the deterministic fallback.
pub struct ScheduleOptimizer {
    tasks: Vec<Task>,
    generator: Option<Arc<dyn ScheduleGenerator>>,
    optimized_schedule: Option<ScheduleResult>,
}

impl Default for ScheduleOptimizer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ScheduleOptimizer {
    pub fn new(generator: Option<Arc<dyn ScheduleGenerator>>) -> Self {
        Self {
            tasks: Vec::new(),
            generator,
            optimized_schedule: None,
        }
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Last schedule accepted from the generative path.
    pub fn optimized_schedule(&self) -> Option<&ScheduleResult> {
        self.optimized_schedule.as_ref()
    }

    pub fn validate_tasks(&self) -> Vec<String> {
        schedule_validator::validate_tasks(&self.tasks)
    }

    pub fn detect_schedule_conflicts(&self, events: &[ScheduledEvent]) -> Vec<String> {
        schedule_validator::detect_schedule_conflicts(events)
    }

    pub fn create_fallback_schedule(&self) -> ScheduleResult {
        create_fallback_schedule(&self.tasks, &SchedulePreferences::default())
    }

    /// Asks the generator for a schedule, falling back to the deterministic
    /// engine when no generator is configured or its output is unusable. An
    /// empty list or any invalid task is an error on every path.
    pub async fn optimize_schedule(
        &mut self,
        preferences: &SchedulePreferences,
    ) -> AppResult<OptimizationOutcome> {
        if self.tasks.is_empty() {
            return Err(AppError::validation(
                "No tasks to optimize. Please add some tasks first.",
            ));
        }

        let errors = self.validate_tasks();
        if !errors.is_empty() {
            return Err(AppError::validation_with_details(
                format!("Task validation failed: {}", errors.join("; ")),
                json!({ "errors": errors }),
            ));
        }

        let snapshot = self.tasks.clone();

        let Some(generator) = self.generator.clone() else {
            info!(target: "app::optimizer", "no generator configured, using fallback");
            return Ok(fallback(&snapshot, preferences));
        };

        let prompt = build_schedule_prompt(&snapshot, preferences);
        match generator.generate(&prompt).await {
            Ok(text) => match extract_schedule_json(&text) {
                Some(schedule) => {
                    info!(
                        target: "app::optimizer",
                        days = schedule.optimized_schedule.len(),
                        "accepted generated schedule"
                    );
                    self.optimized_schedule = Some(schedule.clone());
                    Ok(OptimizationOutcome {
                        source: ScheduleSource::Ai,
                        schedule,
                    })
                }
                None => {
                    warn!(
                        target: "app::optimizer",
                        response_len = text.len(),
                        "generated text held no usable schedule, using fallback"
                    );
                    Ok(fallback(&snapshot, preferences))
                }
            },
            Err(error) => {
                warn!(
                    target: "app::optimizer",
                    error = %error,
                    "schedule generation failed, using fallback"
                );
                Ok(fallback(&snapshot, preferences))
            }
        }
    }
}

fn fallback(tasks: &[Task], preferences: &SchedulePreferences) -> OptimizationOutcome {
    OptimizationOutcome {
        source: ScheduleSource::Fallback,
        schedule: create_fallback_schedule(tasks, preferences),
    }
}

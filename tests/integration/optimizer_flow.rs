use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrona_app_lib::error::{AiErrorCode, AppError, AppResult};
use chrona_app_lib::models::preferences::SchedulePreferences;
use chrona_app_lib::models::schedule::ScheduleSource;
use chrona_app_lib::models::task::{Priority, Task};
use chrona_app_lib::services::fallback_scheduler::create_fallback_schedule;
use chrona_app_lib::services::genai_service::ScheduleGenerator;
use chrona_app_lib::services::schedule_optimizer::ScheduleOptimizer;
use chrona_app_lib::{plan, PlanRequest};
use serde_json::json;

enum Reply {
    Text(String),
    Fail,
}

struct ScriptedGenerator {
    reply: Reply,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn shared(generator: &Arc<ScriptedGenerator>) -> Arc<dyn ScheduleGenerator> {
    generator.clone()
}

#[async_trait]
impl ScheduleGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(prompt.contains("=== USER TASKS ==="));
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail => Err(AppError::ai(AiErrorCode::GenAiUnavailable, "scripted outage")),
        }
    }
}

fn generated_schedule() -> String {
    let body = json!({
        "optimized_schedule": [{
            "day": 1,
            "day_name": "Today",
            "theme": "Balanced",
            "focus": "Mixed tasks",
            "energy_pattern": "steady",
            "tasks": [
                {"task_name": "Write report", "start_time": "09:00", "end_time": "11:00",
                 "priority": "high", "category": "work", "notes": "generated"}
            ]
        }],
        "daily_summary": {
            "total_work_time": "2 hours 0 minutes",
            "personal_time": "7 hours 0 minutes",
            "sleep_time": "8 hours",
            "meal_time": "2 hours",
            "exercise_time": "45 minutes",
            "productivity_score": 35
        }
    });
    format!("Sure! Here is the plan:\n```json\n{body}\n```")
}

fn optimizer_with(generator: Option<Arc<dyn ScheduleGenerator>>) -> ScheduleOptimizer {
    let mut optimizer = ScheduleOptimizer::new(generator);
    optimizer.add_task(Task::new("Write report", 120, Priority::High).with_category("work"));
    optimizer.add_task(Task::new("Call plumber", 15, Priority::Low).with_category("personal"));
    optimizer
}

#[tokio::test]
async fn generated_schedule_is_accepted() {
    let generator = ScriptedGenerator::new(Reply::Text(generated_schedule()));
    let mut optimizer = optimizer_with(Some(shared(&generator)));

    let outcome = optimizer
        .optimize_schedule(&SchedulePreferences::default())
        .await
        .expect("optimize");

    assert_eq!(generator.calls(), 1);
    assert_eq!(outcome.source, ScheduleSource::Ai);
    assert_eq!(outcome.schedule.optimized_schedule[0].tasks[0].notes, "generated");
    assert_eq!(optimizer.optimized_schedule(), Some(&outcome.schedule));
}

#[tokio::test]
async fn unparseable_text_falls_back() {
    let generator = ScriptedGenerator::new(Reply::Text("I'd rather not.".into()));
    let mut optimizer = optimizer_with(Some(shared(&generator)));

    let outcome = optimizer
        .optimize_schedule(&SchedulePreferences::with_duration("3 days (Long weekend)"))
        .await
        .expect("optimize");

    assert_eq!(generator.calls(), 1);
    assert_eq!(outcome.source, ScheduleSource::Fallback);
    assert_eq!(outcome.schedule.optimized_schedule.len(), 3);
    assert!(optimizer.optimized_schedule().is_none());
}

#[tokio::test]
async fn generator_error_falls_back() {
    let generator = ScriptedGenerator::new(Reply::Fail);
    let mut optimizer = optimizer_with(Some(shared(&generator)));

    let outcome = optimizer
        .optimize_schedule(&SchedulePreferences::default())
        .await
        .expect("optimize");

    assert_eq!(outcome.source, ScheduleSource::Fallback);
    assert_eq!(outcome.schedule.scheduled_task_count(), 2);
}

#[tokio::test]
async fn missing_generator_uses_fallback_directly() {
    let mut optimizer = optimizer_with(None);
    assert!(!optimizer.has_generator());

    let preferences = SchedulePreferences::with_duration("7 days (Full week)");
    let outcome = optimizer
        .optimize_schedule(&preferences)
        .await
        .expect("optimize");

    assert_eq!(outcome.source, ScheduleSource::Fallback);
    assert_eq!(outcome.schedule.optimized_schedule.len(), 7);
    assert_eq!(
        outcome.schedule,
        create_fallback_schedule(optimizer.tasks(), &preferences)
    );
    assert_eq!(optimizer.create_fallback_schedule().optimized_schedule.len(), 1);
}

#[tokio::test]
async fn empty_task_list_is_a_validation_error() {
    let mut optimizer = ScheduleOptimizer::new(None);
    let error = optimizer
        .optimize_schedule(&SchedulePreferences::default())
        .await
        .expect_err("no tasks");

    assert!(matches!(error, AppError::Validation { .. }));
}

#[tokio::test]
async fn oversized_task_is_rejected_before_generation() {
    let generator = ScriptedGenerator::new(Reply::Text(generated_schedule()));
    let mut optimizer = optimizer_with(Some(shared(&generator)));
    optimizer.add_task(Task::new("Hackathon", 500, Priority::Medium));
    optimizer.add_task(Task::new("  ", 10, Priority::Low));

    let error = optimizer
        .optimize_schedule(&SchedulePreferences::default())
        .await
        .expect_err("invalid tasks");

    assert_eq!(generator.calls(), 0);
    let message = error.to_string();
    assert!(message.contains("Task 'Hackathon' duration is too long"));
    assert!(message.contains("Task 4 has no name; Task 'Task 4' duration is too short"));

    let details = error.validation_details().expect("details");
    assert_eq!(details["errors"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn invalid_tasks_are_rejected_without_a_generator() {
    let mut optimizer = ScheduleOptimizer::new(None);
    optimizer.add_task(Task::new("Blink", 0, Priority::High));
    optimizer.add_task(Task::new("Forever", u32::MAX, Priority::Low));

    let error = optimizer
        .optimize_schedule(&SchedulePreferences::default())
        .await
        .expect_err("invalid tasks");

    assert!(matches!(error, AppError::Validation { .. }));
    let message = error.to_string();
    assert!(message.contains("Task 'Blink' duration is too short"));
    assert!(message.contains("Task 'Forever' duration is too long"));
}

#[tokio::test]
async fn plan_without_generator_validates_wire_tasks() {
    let request: PlanRequest = serde_json::from_value(json!({
        "tasks": [
            {"name": "Marathon", "duration": 500},
            {"name": "Blink", "duration": 0}
        ],
        "preferences": {"schedule_duration": "3 days"}
    }))
    .expect("request");

    let error = plan(request, None).await.expect_err("invalid tasks");
    let details = error.validation_details().expect("details");
    assert_eq!(details["errors"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn conflicts_in_generated_schedule_are_reported() {
    let generator = ScriptedGenerator::new(Reply::Text(generated_schedule()));
    let mut optimizer = optimizer_with(Some(shared(&generator)));
    let outcome = optimizer
        .optimize_schedule(&SchedulePreferences::default())
        .await
        .expect("optimize");

    let mut events = outcome.schedule.optimized_schedule[0].tasks.clone();
    assert!(optimizer.detect_schedule_conflicts(&events).is_empty());

    let mut clash = events[0].clone();
    clash.task_name = "Standup".into();
    events.push(clash);
    assert_eq!(
        optimizer.detect_schedule_conflicts(&events),
        vec!["Time conflict between 'Write report' and 'Standup'".to_string()]
    );
}

#[tokio::test]
async fn plan_request_parses_wire_json() {
    let request: PlanRequest = serde_json::from_value(json!({
        "tasks": [
            {"name": "Write report", "duration": 120, "priority": "high", "category": "work"},
            {"name": "Gym", "duration": 60}
        ],
        "preferences": {"schedule_duration": "2 days (Weekend)"}
    }))
    .expect("request");

    let outcome = plan(request, None).await.expect("plan");
    assert_eq!(outcome.source, ScheduleSource::Fallback);

    let names: Vec<&str> = outcome
        .schedule
        .optimized_schedule
        .iter()
        .map(|day| day.day_name.as_str())
        .collect();
    assert_eq!(names, vec!["Saturday", "Sunday"]);

    let rendered = serde_json::to_value(&outcome).expect("serialize");
    assert_eq!(rendered["source"], "fallback");
    assert!(rendered["schedule"]["daily_summary"]["productivity_score"].is_number());
}

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::info;

use crate::error::AppResult;
use crate::models::preferences::SchedulePreferences;
use crate::models::schedule::OptimizationOutcome;
use crate::models::task::Task;
use crate::services::genai_service::{GenAiConfig, ScheduleGenerator};
use crate::services::schedule_optimizer::ScheduleOptimizer;

const DEFAULT_LOG_DIR: &str = "logs";

/// Request accepted by the `chrona-plan` binary on stdin.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanRequest {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub preferences: SchedulePreferences,
}

pub async fn run() -> i32 {
    match try_run().await {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("failed to build schedule: {error}");
            1
        }
    }
}

async fn try_run() -> AppResult<()> {
    let log_dir = std::env::var("CHRONA_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_DIR));
    crate::utils::logger::init_logging(&log_dir)?;

    let mut raw = String::new();
    tokio::io::stdin().read_to_string(&mut raw).await?;
    let request: PlanRequest = serde_json::from_str(&raw)?;

    let generator = GenAiConfig::from_env()
        .build_client()?
        .map(|client| Arc::new(client) as Arc<dyn ScheduleGenerator>);

    let outcome = plan(request, generator).await?;
    info!(
        target: "app::optimizer",
        source = ?outcome.source,
        days = outcome.schedule.optimized_schedule.len(),
        "schedule ready"
    );

    let mut rendered = serde_json::to_vec_pretty(&outcome)?;
    rendered.push(b'\n');
    let mut stdout = tokio::io::stdout();
    stdout.write_all(&rendered).await?;
    stdout.flush().await?;
    Ok(())
}

/// Runs one optimization pass over a request.
pub async fn plan(
    request: PlanRequest,
    generator: Option<Arc<dyn ScheduleGenerator>>,
) -> AppResult<OptimizationOutcome> {
    let mut optimizer = ScheduleOptimizer::new(generator);
    for task in request.tasks {
        optimizer.add_task(task);
    }
    optimizer.optimize_schedule(&request.preferences).await
}

use std::time::{Duration as StdDuration, Instant};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value as JsonValue};
use tokio::time::sleep;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{AiErrorCode, AppError, AppResult};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// Anything that turns a schedule prompt into raw model text.
#[async_trait]
pub trait ScheduleGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenAiConfig {
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub model: String,
    pub http_timeout: StdDuration,
    pub retry_delays: Vec<StdDuration>,
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            http_timeout: StdDuration::from_secs(30),
            retry_delays: vec![
                StdDuration::from_secs(0),
                StdDuration::from_secs(1),
                StdDuration::from_secs(2),
                StdDuration::from_secs(4),
            ],
        }
    }
}

impl GenAiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests need not touch
    /// the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let api_key = lookup("CHRONA_GENAI_API_KEY")
            .or_else(|| lookup("GOOGLE_GENAI_API_KEY"))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let api_base_url = lookup("CHRONA_GENAI_BASE_URL")
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.api_base_url);
        let model = lookup("CHRONA_GENAI_MODEL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.model);

        Self {
            api_key,
            api_base_url,
            model,
            ..defaults
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// `None` when no key is configured; callers then go straight to the fallback.
    pub fn build_client(&self) -> AppResult<Option<GenAiClient>> {
        match &self.api_key {
            Some(api_key) => Ok(Some(GenAiClient::try_new(self, api_key.clone())?)),
            None => Ok(None),
        }
    }
}

pub struct GenAiClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
    retry_delays: Vec<StdDuration>,
}

impl GenAiClient {
    pub fn try_new(config: &GenAiConfig, api_key: String) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Some(StdDuration::from_secs(90)))
            .build()
            .map_err(|err| AppError::other(format!("failed to build GenAI HTTP client: {err}")))?;

        let base_url = config.api_base_url.trim_end_matches('/');
        let endpoint = format!("{base_url}/v1beta/models/{}:generateContent", config.model);

        Ok(Self {
            client,
            api_key,
            endpoint,
            model: config.model.clone(),
            retry_delays: config.retry_delays.clone(),
        })
    }

    fn build_request_body(prompt: &str) -> JsonValue {
        json!({
            "contents": [
                { "role": "user", "parts": [{ "text": prompt }] }
            ],
            "generationConfig": {
                "temperature": 0.3,
                "topP": 0.9
            }
        })
    }

    fn extract_text(body: &JsonValue, correlation_id: &str) -> AppResult<String> {
        let parts = body
            .pointer("/candidates/0/content/parts")
            .and_then(|value| value.as_array())
            .ok_or_else(|| {
                AppError::ai_with_details(
                    AiErrorCode::InvalidResponse,
                    "GenAI response has no candidate content",
                    Some(correlation_id),
                    Some(json!({ "reason": "missing_candidate" })),
                )
            })?;

        let text: String = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|value| value.as_str()))
            .collect();

        if text.trim().is_empty() {
            return Err(AppError::ai_with_details(
                AiErrorCode::InvalidResponse,
                "GenAI response text is empty",
                Some(correlation_id),
                Some(json!({ "reason": "empty_text" })),
            ));
        }

        Ok(text)
    }

    pub fn map_http_error(status: StatusCode, correlation_id: &str) -> (AppError, bool) {
        let error = |code: AiErrorCode, message: String| {
            AppError::ai_with_details(code, message, Some(correlation_id), None)
        };

        match status {
            StatusCode::UNAUTHORIZED => (
                error(
                    AiErrorCode::MissingApiKey,
                    "GenAI API key is invalid or unauthorized".to_string(),
                ),
                false,
            ),
            StatusCode::FORBIDDEN => (
                error(
                    AiErrorCode::Forbidden,
                    "GenAI API access forbidden".to_string(),
                ),
                false,
            ),
            StatusCode::TOO_MANY_REQUESTS => (
                error(
                    AiErrorCode::RateLimited,
                    "GenAI rate limit reached, retry later".to_string(),
                ),
                true,
            ),
            status if status.is_server_error() => (
                error(
                    AiErrorCode::GenAiUnavailable,
                    format!(
                        "GenAI service temporarily unavailable (status {})",
                        status.as_u16()
                    ),
                ),
                true,
            ),
            StatusCode::BAD_REQUEST => (
                error(
                    AiErrorCode::InvalidRequest,
                    "GenAI request is malformed".to_string(),
                ),
                false,
            ),
            StatusCode::NOT_FOUND => (
                error(
                    AiErrorCode::InvalidRequest,
                    "GenAI endpoint or model not found".to_string(),
                ),
                false,
            ),
            status => (
                error(
                    AiErrorCode::Unknown,
                    format!("GenAI returned status {}", status.as_u16()),
                ),
                false,
            ),
        }
    }

    fn error_from_reqwest(err: reqwest::Error, correlation_id: &str) -> (AppError, bool) {
        if err.is_timeout() {
            (
                AppError::ai_with_details(
                    AiErrorCode::HttpTimeout,
                    "GenAI request timed out",
                    Some(correlation_id),
                    None,
                ),
                true,
            )
        } else if err.is_connect() {
            (
                AppError::ai_with_details(
                    AiErrorCode::GenAiUnavailable,
                    "GenAI connection failed",
                    Some(correlation_id),
                    None,
                ),
                true,
            )
        } else if let Some(status) = err.status() {
            Self::map_http_error(status, correlation_id)
        } else {
            (
                AppError::ai_with_details(
                    AiErrorCode::Unknown,
                    format!("GenAI request failed: {err}"),
                    Some(correlation_id),
                    None,
                ),
                false,
            )
        }
    }

    async fn invoke(&self, prompt: &str) -> AppResult<String> {
        let correlation_id = Uuid::new_v4().to_string();
        let request_body = Self::build_request_body(prompt);
        let mut last_error: Option<AppError> = None;

        for (attempt, delay) in self.retry_delays.iter().enumerate() {
            if !delay.is_zero() {
                sleep(*delay).await;
            }

            debug!(
                target: "app::ai::genai",
                attempt = attempt + 1,
                correlation_id = %correlation_id,
                model = %self.model,
                prompt_len = prompt.len(),
                "invoking GenAI"
            );

            let start = Instant::now();
            let response = self
                .client
                .post(&self.endpoint)
                .header("x-goog-api-key", &self.api_key)
                .json(&request_body)
                .send()
                .await;
            let is_last = attempt + 1 == self.retry_delays.len();

            match response {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        let latency_ms = start.elapsed().as_millis();
                        let body: JsonValue = resp.json().await.map_err(|err| {
                            AppError::ai_with_details(
                                AiErrorCode::InvalidResponse,
                                "failed to decode GenAI response",
                                Some(correlation_id.as_str()),
                                Some(json!({ "reason": err.to_string() })),
                            )
                        })?;

                        debug!(
                            target: "app::ai::genai",
                            correlation_id = %correlation_id,
                            latency_ms,
                            "GenAI responded"
                        );

                        return Self::extract_text(&body, &correlation_id);
                    }

                    let (error, retryable) = Self::map_http_error(status, &correlation_id);
                    warn!(
                        target: "app::ai::genai",
                        correlation_id = %correlation_id,
                        status = status.as_u16(),
                        retryable,
                        "GenAI returned non-success status"
                    );

                    if !retryable || is_last {
                        return Err(error);
                    }
                    last_error = Some(error);
                }
                Err(err) => {
                    let (error, retryable) = Self::error_from_reqwest(err, &correlation_id);
                    warn!(
                        target: "app::ai::genai",
                        correlation_id = %correlation_id,
                        retryable,
                        "GenAI request error"
                    );

                    if !retryable || is_last {
                        return Err(error);
                    }
                    last_error = Some(error);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            AppError::ai_with_details(
                AiErrorCode::GenAiUnavailable,
                "GenAI request failed",
                Some(correlation_id.as_str()),
                None,
            )
        }))
    }
}

pub mod testing {
    use super::*;

    /// Exposes status mapping for integration tests without widening the client API.
    pub fn map_http_error(status: StatusCode) -> (AppError, bool) {
        GenAiClient::map_http_error(status, "test-correlation-id")
    }

    /// One generate call against `base_url` with the given retry schedule.
    pub async fn generate_via_http(
        base_url: &str,
        timeout: StdDuration,
        retry_delays: Vec<StdDuration>,
        prompt: &str,
    ) -> AppResult<String> {
        let config = GenAiConfig {
            api_key: Some("test-key".to_string()),
            api_base_url: base_url.trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.to_string(),
            http_timeout: timeout,
            retry_delays,
        };
        let client = GenAiClient::try_new(&config, "test-key".to_string())?;
        client.generate(prompt).await
    }
}

#[async_trait]
impl ScheduleGenerator for GenAiClient {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        self.invoke(prompt).await
    }
}

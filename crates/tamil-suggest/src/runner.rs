//! Client for the optional remote conversion service ("runner").
//!
//! Request: `POST {base_url}{path}` with `{"text": ...}`.
//! Response: `{"suggestions": [{"word" | "ta": ..., "score"?: ...}, ...]}`.
//! A runner's own scores are not read; runner candidates are ranked with
//! `scorer.runner_score`.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{error, info};

use tamil_core::settings::RunnerSettings;

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("runner returned status {0}")]
    Status(u16),
    #[error("runner timed out")]
    Timeout,
    #[error("malformed runner payload: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunnerSuggestion {
    pub word: String,
}

/// A remote suggestion source. Called once per pipeline invocation, never
/// retried.
pub trait Runner: Send + Sync {
    fn suggest(&self, text: &str) -> Result<Vec<RunnerSuggestion>, RunnerError>;
}

#[derive(Serialize)]
struct RunnerRequest<'a> {
    text: &'a str,
}

pub struct HttpRunner {
    agent: ureq::Agent,
    url: String,
}

impl HttpRunner {
    pub fn new(base_url: &str, path: &str, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            url: format!("{}{}", base_url.trim_end_matches('/'), path),
        }
    }

    /// `None` when no base URL is configured.
    pub fn from_settings(settings: &RunnerSettings) -> Option<Self> {
        settings
            .is_enabled()
            .then(|| Self::new(settings.base_url.trim(), &settings.path, settings.timeout()))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn map_ureq_error(e: ureq::Error) -> RunnerError {
    match e {
        ureq::Error::Timeout(_) => RunnerError::Timeout,
        other => RunnerError::Http(other.to_string()),
    }
}

impl Runner for HttpRunner {
    fn suggest(&self, text: &str) -> Result<Vec<RunnerSuggestion>, RunnerError> {
        let start = Instant::now();
        let body = serde_json::to_string(&RunnerRequest { text })
            .map_err(|e| RunnerError::Malformed(e.to_string()))?;

        let result = self
            .agent
            .post(&self.url)
            .header("Content-Type", "application/json")
            .send(body.as_str())
            .map_err(map_ureq_error)
            .and_then(|resp| {
                let status = resp.status().as_u16();
                if status != 200 {
                    return Err(RunnerError::Status(status));
                }
                resp.into_body()
                    .read_to_string()
                    .map_err(map_ureq_error)
            })
            .and_then(|payload| parse_payload(&payload));

        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        match &result {
            Ok(items) => info!(url = %self.url, latency_ms, count = items.len(), "runner ok"),
            Err(e) => error!(url = %self.url, latency_ms, error = %e, "runner error"),
        }
        result
    }
}

/// Parse a runner response body. Entries without a string `word` or `ta`
/// are dropped; a body without a `suggestions` array is malformed.
pub fn parse_payload(body: &str) -> Result<Vec<RunnerSuggestion>, RunnerError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| RunnerError::Malformed(e.to_string()))?;
    let Some(items) = value.get("suggestions").and_then(|s| s.as_array()) else {
        return Err(RunnerError::Malformed("missing suggestions array".into()));
    };

    Ok(items
        .iter()
        .filter_map(|item| {
            let word = item
                .get("word")
                .and_then(|w| w.as_str())
                .or_else(|| item.get("ta").and_then(|w| w.as_str()))?;
            Some(RunnerSuggestion {
                word: word.to_string(),
            })
        })
        .collect())
}

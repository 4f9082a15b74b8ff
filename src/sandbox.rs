// src/sandbox.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Judge0 language id for Python 3.8.1, the only language this backend grades.
pub const PYTHON_LANGUAGE_ID: u32 = 71;

/// Judge0 status id meaning the run completed normally ("Accepted").
pub const STATUS_ACCEPTED: i64 = 3;
/// Judge0 status id for "Time Limit Exceeded".
pub const STATUS_TIME_LIMIT_EXCEEDED: i64 = 5;

/// How long we wait for a synchronous (`wait=true`) sandbox run before
/// giving up on the request itself.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Request body for the sandbox submissions endpoint.
/// Field names follow the Judge0 wire format.
#[derive(Debug, Serialize)]
struct SubmissionRequest<'a> {
    source_code: &'a str,
    language_id: u32,
    stdin: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecutionStatus {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub description: String,
}

/// Raw outcome of one sandbox run, as returned by Judge0.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecutionResult {
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
    #[serde(default)]
    pub status: ExecutionStatus,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub memory: Option<f64>,
}

impl ExecutionResult {
    /// The run completed normally. We do not inspect status ids beyond
    /// "succeeded vs not" (plus the timeout id).
    pub fn succeeded(&self) -> bool {
        self.status.id == STATUS_ACCEPTED
    }

    pub fn is_timeout(&self) -> bool {
        self.status.id == STATUS_TIME_LIMIT_EXCEEDED
    }

    /// Returns the first non-empty error channel: stderr, then compile_output.
    pub fn error_output(&self) -> Option<&str> {
        self.stderr
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.compile_output.as_deref().filter(|s| !s.is_empty()))
    }

    /// Human-readable description of a failed run, for `GradeResult.errors`.
    pub fn failure_message(&self) -> String {
        self.error_output()
            .map(str::to_string)
            .unwrap_or_else(|| self.status.description.clone())
    }
}

/// Errors from the execution collaborator itself (not from the graded code).
#[derive(Debug)]
pub enum ExecutionError {
    /// The request to the sandbox timed out before a response arrived.
    Timeout,

    /// Transport-level failure (connection refused, DNS, malformed body...).
    Request(String),

    /// The sandbox answered with a non-success HTTP status.
    BadStatus(u16),
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionError::Timeout => write!(f, "Sandbox request timed out"),
            ExecutionError::Request(msg) => write!(f, "Sandbox request failed: {}", msg),
            ExecutionError::BadStatus(code) => write!(f, "Sandbox returned HTTP {}", code),
        }
    }
}

impl std::error::Error for ExecutionError {}

/// Seam between grading and the execution service. The orchestrator only
/// depends on this trait, so tests can substitute scripted executors.
#[async_trait]
pub trait CodeExecutor: Send + Sync {
    /// Runs one source payload to completion and returns the captured output.
    /// Exactly one call is made per question per grading attempt; no retries.
    async fn execute(&self, source_code: &str) -> Result<ExecutionResult, ExecutionError>;
}

/// HTTP client for a Judge0-compatible execution service.
#[derive(Clone)]
pub struct SandboxClient {
    http: reqwest::Client,
    base_url: Url,
}

impl SandboxClient {
    /// Builds a client for the given sandbox base URL (e.g. `http://host:2358`).
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, base_url })
    }
}

#[async_trait]
impl CodeExecutor for SandboxClient {
    async fn execute(&self, source_code: &str) -> Result<ExecutionResult, ExecutionError> {
        let url = self
            .base_url
            .join("submissions")
            .map_err(|e| ExecutionError::Request(e.to_string()))?;

        let response = self
            .http
            .post(url)
            .query(&[("base64_encoded", "false"), ("wait", "true")])
            .json(&SubmissionRequest {
                source_code,
                language_id: PYTHON_LANGUAGE_ID,
                stdin: "",
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExecutionError::Timeout
                } else {
                    ExecutionError::Request(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(ExecutionError::BadStatus(response.status().as_u16()));
        }

        response
            .json::<ExecutionResult>()
            .await
            .map_err(|e| ExecutionError::Request(e.to_string()))
    }
}

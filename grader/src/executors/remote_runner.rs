//! HTTP [`Executor`] for a Piston v2 compatible code runner.
//!
//! Every failure mode (transport, status, body, compile, run, signal) is folded into an
//! [`ExecutionResult`] with `succeeded == false`; `execute` only returns `Err` when the HTTP
//! client itself cannot be used.

use crate::error::GraderError;
use crate::traits::executor::Executor;
use crate::types::ExecutionResult;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use util::grading_config::RunnerOptions;

#[derive(Debug, Serialize)]
struct ExecuteRequest<'a> {
    language: &'a str,
    version: &'a str,
    files: Vec<SourceFile<'a>>,
    stdin: &'a str,
}

#[derive(Debug, Serialize)]
struct SourceFile<'a> {
    name: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExecuteResponse {
    run: StageResult,
    #[serde(default)]
    compile: Option<StageResult>,
}

#[derive(Debug, Default, Deserialize)]
struct StageResult {
    #[serde(default)]
    stdout: String,
    #[serde(default)]
    stderr: String,
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    signal: Option<String>,
}

impl StageResult {
    fn failed(&self) -> bool {
        self.signal.is_some() || self.code.is_some_and(|code| code != 0)
    }

    fn describe_failure(&self, stage: &str) -> String {
        match (&self.signal, self.code) {
            (Some(signal), _) => format!("{stage} terminated by signal {signal}"),
            (None, Some(code)) => format!("{stage} exited with code {code}"),
            (None, None) => format!("{stage} failed"),
        }
    }
}

pub struct RemoteRunner {
    client: Client,
    execute_url: String,
    options: RunnerOptions,
}

impl RemoteRunner {
    /// Builds a runner posting to `{runner_url}/api/v2/execute`.
    pub fn new(runner_url: &str, options: RunnerOptions) -> Result<Self, GraderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .build()
            .map_err(|e| GraderError::ExecutionError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            execute_url: format!("{}/api/v2/execute", runner_url.trim_end_matches('/')),
            options,
        })
    }

    pub fn execute_url(&self) -> &str {
        &self.execute_url
    }

    fn interpret(response: ExecuteResponse) -> ExecutionResult {
        if let Some(compile) = response.compile.as_ref().filter(|c| c.failed()) {
            let stderr = if compile.stderr.trim().is_empty() {
                compile.stdout.clone()
            } else {
                compile.stderr.clone()
            };
            return ExecutionResult::failure(stderr, Some(compile.describe_failure("Compilation")));
        }

        let run = response.run;
        if run.failed() {
            let message = run.describe_failure("Program");
            return ExecutionResult {
                succeeded: false,
                stdout: run.stdout,
                stderr: run.stderr,
                error_message: Some(message),
            };
        }

        ExecutionResult {
            succeeded: true,
            stdout: run.stdout,
            stderr: run.stderr,
            error_message: None,
        }
    }
}

#[async_trait]
impl Executor for RemoteRunner {
    async fn execute(
        &self,
        source_code: &str,
        stdin: Option<&str>,
    ) -> Result<ExecutionResult, GraderError> {
        let language = self.options.language;
        let body = ExecuteRequest {
            language: language.runner_name(),
            version: &self.options.version,
            files: vec![SourceFile {
                name: language.source_file_name(),
                content: source_code,
            }],
            stdin: stdin.unwrap_or(""),
        };

        debug!(url = %self.execute_url, language = body.language, "Submitting code to runner");

        let response = match self.client.post(&self.execute_url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Runner request failed: {e}");
                return Ok(ExecutionResult::failure(
                    "",
                    Some(format!("Could not reach the code runner: {e}")),
                ));
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to read runner response: {e}");
                return Ok(ExecutionResult::failure(
                    "",
                    Some(format!("Failed to read runner response: {e}")),
                ));
            }
        };

        if !status.is_success() {
            warn!(%status, "Runner rejected the request");
            return Ok(ExecutionResult::failure(
                "",
                Some(format!("Code runner returned HTTP {status}: {}", text.trim())),
            ));
        }

        match serde_json::from_str::<ExecuteResponse>(&text) {
            Ok(decoded) => Ok(Self::interpret(decoded)),
            Err(e) => {
                warn!("Undecodable runner response: {e}");
                Ok(ExecutionResult::failure(
                    "",
                    Some(format!("Error decoding runner response: {e}")),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::post};
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    async fn fake_execute(Json(body): Json<Value>) -> axum::response::Response {
        let content = body["files"][0]["content"].as_str().unwrap_or_default();
        let stdin = body["stdin"].as_str().unwrap_or_default();

        if content.contains("HTTP_500") {
            return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
        }
        if content.contains("GARBAGE") {
            return "not json".into_response();
        }
        if content.contains("COMPILE_ERROR") {
            return Json(json!({
                "compile": {"stdout": "", "stderr": "main.c:1: error: expected ';'", "code": 1, "signal": null},
                "run": {"stdout": "", "stderr": "", "code": null, "signal": null}
            }))
            .into_response();
        }
        if content.contains("SEGFAULT") {
            return Json(json!({
                "run": {"stdout": "partial", "stderr": "", "code": null, "signal": "SIGSEGV"}
            }))
            .into_response();
        }

        Json(json!({
            "language": body["language"],
            "version": "10.2.0",
            "compile": {"stdout": "", "stderr": "", "code": 0, "signal": null},
            "run": {"stdout": format!("echo:{stdin}"), "stderr": "", "code": 0, "signal": null}
        }))
        .into_response()
    }

    async fn spawn_runner() -> String {
        let port = portpicker::pick_unused_port().expect("free port");
        let listener = TcpListener::bind(("127.0.0.1", port)).await.unwrap();
        let app = Router::new().route("/api/v2/execute", post(fake_execute));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://127.0.0.1:{port}/")
    }

    #[test]
    fn execute_url_trims_trailing_slash() {
        let runner = RemoteRunner::new("https://emkc.org/", RunnerOptions::default()).unwrap();
        assert_eq!(runner.execute_url(), "https://emkc.org/api/v2/execute");
    }

    #[tokio::test]
    async fn successful_run_returns_stdout() {
        let url = spawn_runner().await;
        let runner = RemoteRunner::new(&url, RunnerOptions::default()).unwrap();
        let result = runner.execute("int main(){}", Some("2 3\n")).await.unwrap();
        assert!(result.succeeded);
        assert_eq!(result.stdout, "echo:2 3\n");
        assert!(result.error_message.is_none());
    }

    #[tokio::test]
    async fn compile_failure_prefers_compile_stderr() {
        let url = spawn_runner().await;
        let runner = RemoteRunner::new(&url, RunnerOptions::default()).unwrap();
        let result = runner.execute("COMPILE_ERROR", None).await.unwrap();
        assert!(!result.succeeded);
        assert_eq!(result.diagnostic(), Some("main.c:1: error: expected ';'"));
        assert_eq!(
            result.error_message.as_deref(),
            Some("Compilation exited with code 1")
        );
    }

    #[tokio::test]
    async fn signal_marks_run_as_failed() {
        let url = spawn_runner().await;
        let runner = RemoteRunner::new(&url, RunnerOptions::default()).unwrap();
        let result = runner.execute("SEGFAULT", None).await.unwrap();
        assert!(!result.succeeded);
        assert_eq!(result.stdout, "partial");
        assert_eq!(
            result.diagnostic(),
            Some("Program terminated by signal SIGSEGV")
        );
    }

    #[tokio::test]
    async fn http_error_status_is_a_failed_execution() {
        let url = spawn_runner().await;
        let runner = RemoteRunner::new(&url, RunnerOptions::default()).unwrap();
        let result = runner.execute("HTTP_500", None).await.unwrap();
        assert!(!result.succeeded);
        assert!(result.diagnostic().unwrap().contains("HTTP 500"));
    }

    #[tokio::test]
    async fn undecodable_body_is_a_failed_execution() {
        let url = spawn_runner().await;
        let runner = RemoteRunner::new(&url, RunnerOptions::default()).unwrap();
        let result = runner.execute("GARBAGE", None).await.unwrap();
        assert!(!result.succeeded);
        assert!(result.diagnostic().unwrap().contains("decoding"));
    }

    #[tokio::test]
    async fn unreachable_runner_is_a_failed_execution() {
        let runner = RemoteRunner::new(
            "http://127.0.0.1:9",
            RunnerOptions {
                timeout_secs: 2,
                ..Default::default()
            },
        )
        .unwrap();
        let result = runner.execute("int main(){}", None).await.unwrap();
        assert!(!result.succeeded);
        assert!(result.diagnostic().unwrap().contains("Could not reach"));
    }
}

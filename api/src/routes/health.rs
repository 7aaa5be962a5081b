use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use serde::Serialize;
use util::http::is_url_alive;

const RUNNER_PROBE_TIMEOUT_SECS: u64 = 3;

#[derive(Debug, Serialize, Default)]
pub struct HealthReport {
    pub status: String,
    pub runner_reachable: bool,
}

/// Builds the `/health` route group.
///
/// This includes a single `GET /health` endpoint. Useful for uptime checks, load balancers,
/// or deployment health monitoring.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// GET /health
///
/// Reports that the API is running and whether the code runner answers.
/// The API stays healthy when the runner is down; only problems with expected output
/// need it.
///
/// ### Response
/// - `200 OK`
///
/// ```json
/// {
///   "success": true,
///   "data": { "status": "OK", "runner_reachable": true },
///   "message": "Health check passed"
/// }
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let probe_url = format!("{}/api/v2/runtimes", state.runner_url().trim_end_matches('/'));
    let runner_reachable = is_url_alive(&probe_url, RUNNER_PROBE_TIMEOUT_SECS)
        .await
        .unwrap_or(false);

    Json(ApiResponse::success(
        HealthReport {
            status: "OK".to_string(),
            runner_reachable,
        },
        "Health check passed",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use grader::Grader;
    use grader::executors::remote_runner::RemoteRunner;
    use grader::stores::problem_bank::ProblemBank;
    use serde_json::Value;
    use util::grading_config::{GradingConfig, RunnerOptions};

    /// Asserts that the JSON response matches the expected structure and values.
    #[tokio::test]
    async fn health_check_returns_ok_json() {
        let runner_url = "http://127.0.0.1:9";
        let runner = RemoteRunner::new(
            runner_url,
            RunnerOptions {
                timeout_secs: 1,
                ..Default::default()
            },
        )
        .unwrap();
        let grader = Grader::new(
            ProblemBank::new(vec![], 0.6),
            runner,
            GradingConfig::default_config(),
        );

        let response = health_check(State(AppState::new(grader, runner_url)))
            .await
            .into_response();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["status"], "OK");
        assert_eq!(json["data"]["runner_reachable"], false);
        assert_eq!(json["message"], "Health check passed");
    }
}

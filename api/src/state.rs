//! Application state shared across Axum route handlers.
//!
//! Wraps the grader in an `Arc`; cloning the state per request is cheap.

use grader::Grader;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    grader: Arc<Grader>,
    runner_url: String,
}

impl AppState {
    /// # Arguments
    ///
    /// * `grader` - The fully wired grader (problem bank, runner, config).
    /// * `runner_url` - Base URL of the runner, probed by the health endpoint.
    pub fn new(grader: Grader, runner_url: impl Into<String>) -> Self {
        Self {
            grader: Arc::new(grader),
            runner_url: runner_url.into(),
        }
    }

    pub fn grader(&self) -> &Grader {
        &self.grader
    }

    pub fn runner_url(&self) -> &str {
        &self.runner_url
    }
}

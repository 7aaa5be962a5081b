//! # Types Module
//!
//! Core data exchanged between the grader and its collaborators: the stored problem record
//! and the result of one remote execution.

use serde::{Deserialize, Serialize};

/// A stored problem: statement, reference solution and optional I/O expectations.
///
/// Owned by the problem store and never mutated by the grader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemRecord {
    /// Optional short name, only used by stores for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub problem_text: String,
    pub reference_solution: String,
    /// Fed to the submission's standard input when it is executed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdin: Option<String>,
    /// When present, the submission must reproduce this output before it is scored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
}

impl ProblemRecord {
    pub fn new(problem_text: impl Into<String>, reference_solution: impl Into<String>) -> Self {
        Self {
            title: None,
            problem_text: problem_text.into(),
            reference_solution: reference_solution.into(),
            stdin: None,
            expected_output: None,
        }
    }

    pub fn with_stdin(mut self, stdin: impl Into<String>) -> Self {
        self.stdin = Some(stdin.into());
        self
    }

    pub fn with_expected_output(mut self, expected: impl Into<String>) -> Self {
        self.expected_output = Some(expected.into());
        self
    }
}

/// Outcome of running a submission once on the execution collaborator.
///
/// Compile errors, runtime errors, non-zero exits and transport failures all arrive here as
/// `succeeded == false`; the grader never looks at exit codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub succeeded: bool,
    pub stdout: String,
    pub stderr: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ExecutionResult {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            stdout: stdout.into(),
            ..Default::default()
        }
    }

    pub fn failure(stderr: impl Into<String>, error_message: Option<String>) -> Self {
        Self {
            succeeded: false,
            stdout: String::new(),
            stderr: stderr.into(),
            error_message,
        }
    }

    /// Best available diagnostic text: stderr, then the error message.
    pub fn diagnostic(&self) -> Option<&str> {
        if !self.stderr.trim().is_empty() {
            return Some(self.stderr.as_str());
        }
        self.error_message
            .as_deref()
            .filter(|msg| !msg.trim().is_empty())
    }
}

/// Issues and accumulated penalty produced by the structural checker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuralReport {
    pub issues: Vec<String>,
    pub penalty: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_deserializes_without_optional_fields() {
        let record: ProblemRecord = serde_json::from_str(
            r#"{"problem_text": "Print 7", "reference_solution": "int main(){}"}"#,
        )
        .unwrap();
        assert_eq!(record, ProblemRecord::new("Print 7", "int main(){}"));
    }

    #[test]
    fn diagnostic_prefers_stderr() {
        let result = ExecutionResult::failure("main.c:1: error", Some("exit 1".into()));
        assert_eq!(result.diagnostic(), Some("main.c:1: error"));
    }

    #[test]
    fn diagnostic_falls_back_to_error_message() {
        let result = ExecutionResult::failure("  \n", Some("connection refused".into()));
        assert_eq!(result.diagnostic(), Some("connection refused"));
        assert_eq!(ExecutionResult::failure("", None).diagnostic(), None);
    }
}

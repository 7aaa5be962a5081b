//! # Grading Report Module
//!
//! The value returned by every grading call, whatever path it took.
//!
//! ## JSON Output Example
//!
//! ```json
//! {
//!   "score": 0,
//!   "issues": ["Output does not match the expected output.", "Expected: Sum: 5", "Got: Sum: 6"],
//!   "summary_text": "Your program's output does not match the expected output.",
//!   "matched_problem_text": "Read two numbers and print their sum.",
//!   "user_output": "Sum: 6",
//!   "expected_output": "Sum: 5",
//!   "outputs_matched": false,
//!   "outcome": "output_mismatch"
//! }
//! ```
//!
//! ## Invariants
//!
//! - `score` is within `0..=100`.
//! - `issues` is never empty; [`NO_ISSUES_SENTINEL`] stands in when nothing was found.
//! - `outputs_matched == Some(false)` implies `score == 0`.
//!
//! [`GradingResult::assemble`] enforces all three, so every constructor goes through it.

use crate::scorer::MAX_SCORE;
use serde::{Deserialize, Serialize};

/// Issue reported when grading found nothing to complain about.
pub const NO_ISSUES_SENTINEL: &str = "No issues found.";

/// Terminal state a grading call ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradingOutcome {
    EmptySubmission,
    Unmatched,
    NoOutputCheck,
    ExecutionFailed,
    OutputMismatch,
    OutputMatched,
    InternalFault,
}

impl GradingOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            GradingOutcome::EmptySubmission => "empty_submission",
            GradingOutcome::Unmatched => "unmatched",
            GradingOutcome::NoOutputCheck => "no_output_check",
            GradingOutcome::ExecutionFailed => "execution_failed",
            GradingOutcome::OutputMismatch => "output_mismatch",
            GradingOutcome::OutputMatched => "output_matched",
            GradingOutcome::InternalFault => "internal_fault",
        }
    }
}

/// Score, findings and context for one graded submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingResult {
    pub score: u32,
    pub issues: Vec<String>,
    pub summary_text: String,
    /// `null` when no stored problem matched.
    pub matched_problem_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs_matched: Option<bool>,
    pub outcome: GradingOutcome,
}

/// Output context attached to results that went through execution.
#[derive(Debug, Clone, Default)]
pub struct OutputContext {
    pub user_output: Option<String>,
    pub expected_output: Option<String>,
    pub outputs_matched: Option<bool>,
}

impl GradingResult {
    /// Builds a result, enforcing the module invariants.
    pub fn assemble(
        outcome: GradingOutcome,
        score: u32,
        mut issues: Vec<String>,
        summary_text: impl Into<String>,
        matched_problem_text: Option<String>,
        output: OutputContext,
    ) -> Self {
        if issues.is_empty() {
            issues.push(NO_ISSUES_SENTINEL.to_string());
        }

        let score = if output.outputs_matched == Some(false) {
            0
        } else {
            score.min(MAX_SCORE)
        };

        Self {
            score,
            issues,
            summary_text: summary_text.into(),
            matched_problem_text,
            user_output: output.user_output,
            expected_output: output.expected_output,
            outputs_matched: output.outputs_matched,
            outcome,
        }
    }

    /// A zero-score result without output context.
    pub fn zero(
        outcome: GradingOutcome,
        issues: Vec<String>,
        summary_text: impl Into<String>,
        matched_problem_text: Option<String>,
    ) -> Self {
        Self::assemble(
            outcome,
            0,
            issues,
            summary_text,
            matched_problem_text,
            OutputContext::default(),
        )
    }

    /// True when grading found no issues.
    pub fn is_clean(&self) -> bool {
        self.issues.len() == 1 && self.issues[0] == NO_ISSUES_SENTINEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_issues_get_sentinel() {
        let result = GradingResult::zero(GradingOutcome::Unmatched, vec![], "summary", None);
        assert_eq!(result.issues, vec![NO_ISSUES_SENTINEL.to_string()]);
        assert!(result.is_clean());
    }

    #[test]
    fn score_is_clamped() {
        let result = GradingResult::assemble(
            GradingOutcome::NoOutputCheck,
            250,
            vec![],
            "summary",
            Some("p".into()),
            OutputContext::default(),
        );
        assert_eq!(result.score, 100);
    }

    #[test]
    fn failed_output_match_forces_zero() {
        let result = GradingResult::assemble(
            GradingOutcome::OutputMismatch,
            90,
            vec!["x".into()],
            "summary",
            Some("p".into()),
            OutputContext {
                outputs_matched: Some(false),
                ..Default::default()
            },
        );
        assert_eq!(result.score, 0);
    }

    #[test]
    fn serializes_null_problem_and_skips_absent_outputs() {
        let result = GradingResult::zero(
            GradingOutcome::Unmatched,
            vec!["Use the exact text".into()],
            "Problem not found",
            None,
        );
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["matched_problem_text"].is_null());
        assert!(json.get("user_output").is_none());
        assert!(json.get("outputs_matched").is_none());
        assert_eq!(json["outcome"], "unmatched");
        assert_eq!(GradingOutcome::Unmatched.as_str(), "unmatched");
    }
}

//! # Grader Library
//!
//! Core logic for grading a single C/C++ submission against a stored problem record.
//! A submission is matched to a problem by its statement, optionally executed on a remote
//! runner to verify its output, and otherwise scored by token similarity to the reference
//! solution minus structural penalties.
//!
//! ## Key Concepts
//! - **Grader**: the orchestrator; owns its collaborators and turns every call into a
//!   [`GradingResult`], including failures.
//! - **Collaborators**: [`ProblemStore`], [`Executor`] and [`OutputComparator`] are traits, so
//!   the bank, runner and comparison policy can be swapped.
//! - **Output gating**: when a problem has an expected output, a submission whose output does
//!   not match scores zero without being compared to the reference at all.

pub mod comparators;
pub mod error;
pub mod executors;
pub mod feedback;
pub mod report;
pub mod scorer;
pub mod stores;
pub mod structural_checker;
pub mod traits;
pub mod types;
pub mod utilities;

use crate::comparators::comparator_for;
use crate::error::GraderError;
use crate::feedback::*;
use crate::report::{GradingOutcome, GradingResult, OutputContext};
use crate::scorer::{compose_score, token_similarity};
use crate::structural_checker::check_structure;
use crate::traits::comparator::OutputComparator;
use crate::traits::executor::Executor;
use crate::traits::problem_store::ProblemStore;
use crate::types::{ExecutionResult, ProblemRecord};
use crate::utilities::code_normalization::tokenize;

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tracing::{debug, info, warn};
use util::grading_config::GradingConfig;

/// Grades submissions against the problems held by its store.
///
/// A `Grader` holds no per-call state and is shared between requests (the HTTP service keeps
/// it in an `Arc`).
pub struct Grader {
    store: Box<dyn ProblemStore>,
    executor: Box<dyn Executor>,
    comparator: Box<dyn OutputComparator>,
    config: GradingConfig,
}

impl Grader {
    /// Create a grader. The comparator is chosen from `config.output.comparison`.
    ///
    /// # Arguments
    /// * `store` - Source of problem records.
    /// * `executor` - Runs submissions whose problem has an expected output.
    /// * `config` - Scoring weights, excerpt sizes and comparison policy.
    pub fn new<S, E>(store: S, executor: E, config: GradingConfig) -> Self
    where
        S: ProblemStore + 'static,
        E: Executor + 'static,
    {
        Self {
            store: Box::new(store),
            executor: Box::new(executor),
            comparator: comparator_for(config.output.comparison),
            config,
        }
    }

    /// Replace the configured comparator with a custom strategy.
    pub fn with_comparator<C: OutputComparator + 'static>(mut self, comparator: C) -> Self {
        self.comparator = Box::new(comparator);
        self
    }

    /// Grade `code` as a solution to the problem described by `problem_text`.
    ///
    /// Never fails: collaborator errors and panics become an
    /// [`GradingOutcome::InternalFault`] result with score 0 and the fault in `issues`.
    pub async fn grade(&self, problem_text: &str, code: &str) -> GradingResult {
        match AssertUnwindSafe(self.grade_inner(problem_text, code))
            .catch_unwind()
            .await
        {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => {
                warn!("Grading failed: {err}");
                internal_fault(err.to_string())
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                warn!("Grading panicked: {message}");
                internal_fault(message)
            }
        }
    }

    async fn grade_inner(&self, problem_text: &str, code: &str) -> Result<GradingResult, GraderError> {
        if code.trim().is_empty() {
            info!(outcome = GradingOutcome::EmptySubmission.as_str(), "Graded submission");
            return Ok(GradingResult::zero(
                GradingOutcome::EmptySubmission,
                vec![EMPTY_SUBMISSION_ISSUE.to_string()],
                EMPTY_SUBMISSION_SUMMARY,
                None,
            ));
        }

        let Some(record) = self.store.find_matching_problem(problem_text)? else {
            info!(outcome = GradingOutcome::Unmatched.as_str(), "Graded submission");
            return Ok(GradingResult::zero(
                GradingOutcome::Unmatched,
                vec![UNMATCHED_ISSUE.to_string()],
                UNMATCHED_SUMMARY,
                None,
            ));
        };

        let result = match record.expected_output.as_deref() {
            None => {
                let (score, issues) = self.score_against(code, &record);
                GradingResult::assemble(
                    GradingOutcome::NoOutputCheck,
                    score,
                    issues,
                    similarity_summary(score),
                    Some(record.problem_text.clone()),
                    OutputContext::default(),
                )
            }
            Some(expected) => {
                debug!("Dispatching submission to executor");
                let execution = self
                    .executor
                    .execute(code, record.stdin.as_deref())
                    .await?;
                self.grade_executed(code, &record, expected, execution)
            }
        };

        info!(
            outcome = result.outcome.as_str(),
            score = result.score,
            "Graded submission"
        );
        Ok(result)
    }

    fn grade_executed(
        &self,
        code: &str,
        record: &ProblemRecord,
        expected: &str,
        execution: ExecutionResult,
    ) -> GradingResult {
        let matched_problem = Some(record.problem_text.clone());
        let output = &self.config.output;

        if !execution.succeeded {
            let diagnostic = execution
                .diagnostic()
                .map(|d| head_lines(d, output.diagnostic_lines))
                .unwrap_or_else(|| NO_DIAGNOSTIC.to_string());

            let user_output = (!execution.stdout.trim().is_empty()).then(|| execution.stdout.clone());

            return GradingResult::assemble(
                GradingOutcome::ExecutionFailed,
                0,
                vec![EXECUTION_FAILED_ISSUE.to_string(), diagnostic],
                EXECUTION_FAILED_SUMMARY,
                matched_problem,
                OutputContext {
                    user_output,
                    expected_output: Some(expected.to_string()),
                    outputs_matched: Some(false),
                },
            );
        }

        let context = |matched: bool| OutputContext {
            user_output: Some(execution.stdout.clone()),
            expected_output: Some(expected.to_string()),
            outputs_matched: Some(matched),
        };

        if !self.comparator.outputs_match(&execution.stdout, expected) {
            let issues = vec![
                OUTPUT_MISMATCH_ISSUE.to_string(),
                format!(
                    "Expected: {}",
                    excerpt(&self.comparator.normalize(expected), output.excerpt_chars)
                ),
                format!(
                    "Got: {}",
                    excerpt(
                        &self.comparator.normalize(&execution.stdout),
                        output.excerpt_chars
                    )
                ),
            ];
            return GradingResult::assemble(
                GradingOutcome::OutputMismatch,
                0,
                issues,
                OUTPUT_MISMATCH_SUMMARY,
                matched_problem,
                context(false),
            );
        }

        let (score, issues) = self.score_against(code, record);
        GradingResult::assemble(
            GradingOutcome::OutputMatched,
            score,
            issues,
            correct_output_summary(score),
            matched_problem,
            context(true),
        )
    }

    /// Structural check plus token similarity against the record's reference solution.
    fn score_against(&self, code: &str, record: &ProblemRecord) -> (u32, Vec<String>) {
        let report = check_structure(code, &record.reference_solution);
        let similarity = token_similarity(&tokenize(code), &tokenize(&record.reference_solution));
        let score = compose_score(similarity, report.penalty, &self.config.scoring);
        debug!(similarity, penalty = report.penalty, score, "Scored submission");
        (score, report.issues)
    }
}

fn internal_fault(message: String) -> GradingResult {
    GradingResult::zero(
        GradingOutcome::InternalFault,
        vec![format!("Internal error during grading: {message}")],
        INTERNAL_FAULT_SUMMARY,
        None,
    )
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

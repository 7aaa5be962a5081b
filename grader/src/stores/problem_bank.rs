//! # Problem Bank
//!
//! JSON-file backed [`ProblemStore`]. The file is an array of [`ProblemRecord`] objects and is
//! read once at startup; the bank is immutable afterwards and safe to share between requests.
//!
//! Matching works in two passes:
//! 1. exact match on whitespace-collapsed, lower-cased problem text;
//! 2. otherwise the record whose statement has the highest word-level Jaccard similarity
//!    with the query, provided it reaches the bank's fuzzy threshold. Ties keep the earliest
//!    record in the file.

use crate::error::GraderError;
use crate::scorer::token_similarity;
use crate::traits::problem_store::ProblemStore;
use crate::types::ProblemRecord;
use crate::utilities::file_loader::load_json_file;
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone)]
pub struct ProblemBank {
    problems: Vec<ProblemRecord>,
    fuzzy_threshold: f64,
}

fn canonical(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

impl ProblemBank {
    pub fn new(problems: Vec<ProblemRecord>, fuzzy_threshold: f64) -> Self {
        Self {
            problems,
            fuzzy_threshold: fuzzy_threshold.clamp(0.0, 1.0),
        }
    }

    /// Loads and validates a bank file.
    ///
    /// # Errors
    /// - [`GraderError::IoError`] / [`GraderError::InvalidJson`] from the file loader.
    /// - [`GraderError::MissingField`] when a record has a blank statement or reference solution.
    pub fn from_file(path: impl AsRef<Path>, fuzzy_threshold: f64) -> Result<Self, GraderError> {
        let path = path.as_ref();
        let problems: Vec<ProblemRecord> = load_json_file(path)?;

        for (index, problem) in problems.iter().enumerate() {
            if problem.problem_text.trim().is_empty() {
                return Err(GraderError::MissingField(format!(
                    "problems[{index}].problem_text"
                )));
            }
            if problem.reference_solution.trim().is_empty() {
                return Err(GraderError::MissingField(format!(
                    "problems[{index}].reference_solution"
                )));
            }
        }

        info!("Loaded {} problems from {}", problems.len(), path.display());
        Ok(Self::new(problems, fuzzy_threshold))
    }

    pub fn problems(&self) -> &[ProblemRecord] {
        &self.problems
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}

impl ProblemStore for ProblemBank {
    fn find_matching_problem(
        &self,
        problem_text: &str,
    ) -> Result<Option<ProblemRecord>, GraderError> {
        let query = canonical(problem_text);
        if query.is_empty() {
            return Ok(None);
        }

        if let Some(exact) = self
            .problems
            .iter()
            .find(|p| canonical(&p.problem_text) == query)
        {
            return Ok(Some(exact.clone()));
        }

        let query_words = words(&query);
        let mut best: Option<(&ProblemRecord, f64)> = None;
        for problem in &self.problems {
            let similarity = token_similarity(&query_words, &words(&problem.problem_text));
            if similarity >= self.fuzzy_threshold
                && best.is_none_or(|(_, best_similarity)| similarity > best_similarity)
            {
                best = Some((problem, similarity));
            }
        }

        if let Some((problem, similarity)) = best {
            debug!(
                similarity,
                title = problem.title.as_deref().unwrap_or(""),
                "Fuzzy-matched problem text"
            );
        }
        Ok(best.map(|(problem, _)| problem.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn bank() -> ProblemBank {
        ProblemBank::from_file(
            "src/test_files/problem_bank/problems.json",
            DEFAULT_FUZZY_THRESHOLD,
        )
        .expect("fixture bank loads")
    }

    #[test]
    fn loads_fixture() {
        let bank = bank();
        assert_eq!(bank.len(), 3);
        assert!(bank.problems()[0].expected_output.is_some());
        assert!(bank.problems()[1].expected_output.is_none());
    }

    #[test]
    fn exact_match_ignores_case_and_spacing() {
        let found = bank()
            .find_matching_problem(
                "  write a program that reads an integer\n and prints whether it is EVEN or odd. ",
            )
            .unwrap()
            .expect("match");
        assert_eq!(found.title.as_deref(), Some("Even or odd"));
    }

    #[test]
    fn fuzzy_match_above_threshold() {
        let found = bank()
            .find_matching_problem(
                "Write a program that reads a number and prints if it is even or odd",
            )
            .unwrap()
            .expect("fuzzy match");
        assert_eq!(found.title.as_deref(), Some("Even or odd"));
    }

    #[test]
    fn unrelated_text_does_not_match() {
        let found = bank()
            .find_matching_problem("Compute the factorial of n recursively")
            .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn blank_query_does_not_match() {
        assert!(bank().find_matching_problem("   \n").unwrap().is_none());
    }

    #[test]
    fn strict_threshold_disables_fuzzy_matching() {
        let bank = ProblemBank::new(bank().problems().to_vec(), 1.0);
        let found = bank
            .find_matching_problem(
                "Write a program that reads a number and prints if it is even or odd",
            )
            .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn blank_reference_solution_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bank.json");
        fs::write(
            &path,
            r#"[{"problem_text": "Print hello", "reference_solution": "  "}]"#,
        )
        .unwrap();
        let err = ProblemBank::from_file(&path, 0.6).unwrap_err();
        assert_eq!(
            err,
            GraderError::MissingField("problems[0].reference_solution".to_string())
        );
    }
}

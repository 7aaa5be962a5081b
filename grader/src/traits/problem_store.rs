//! Problem Store Trait
//!
//! The grader never decides how a free-text problem statement maps onto a stored record.
//! That is the store's job: exact lookup, fuzzy matching or anything else. The grader only
//! reads the fields of the record it is handed back.

use crate::error::GraderError;
use crate::types::ProblemRecord;

/// Read-only source of problem records.
pub trait ProblemStore: Send + Sync {
    /// Finds the record that best matches `problem_text`.
    ///
    /// # Returns
    /// - `Ok(Some(record))` when a record matches.
    /// - `Ok(None)` when nothing matches; this is a normal outcome, not a failure.
    /// - `Err(GraderError)` when the store itself cannot answer.
    fn find_matching_problem(&self, problem_text: &str) -> Result<Option<ProblemRecord>, GraderError>;
}

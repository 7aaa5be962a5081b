//! Grader Error Types
//!
//! This module defines the [`GraderError`] enum, which covers the failures that can occur while
//! loading collaborators (problem bank, configuration) or while talking to them during a
//! grading call.
//!
//! Errors never escape [`crate::Grader::grade`]: the orchestrator converts them into a
//! zero-score result carrying the error message. They do surface from constructors such as
//! [`crate::stores::problem_bank::ProblemBank::from_file`], where the caller decides how to react.
//!
//! # Example
//!
//! ```rust
//! use grader::error::GraderError;
//!
//! fn require_text(data: &str) -> Result<(), GraderError> {
//!     if data.trim().is_empty() {
//!         return Err(GraderError::MissingField("problem_text".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_text("  ").is_err());
//! ```

use std::fmt;

/// Represents all error types that can occur in the grader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraderError {
    /// I/O error (file not found, unreadable, too large).
    IoError(String),
    /// JSON is malformed or does not match the expected schema.
    InvalidJson(String),
    /// A required field is missing or blank.
    MissingField(String),
    /// The problem store could not answer a lookup.
    StoreError(String),
    /// The execution collaborator failed in a way it could not report as a failed run.
    ExecutionError(String),
    /// Configuration could not be loaded or is inconsistent.
    ConfigError(String),
}

impl fmt::Display for GraderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraderError::IoError(msg) => write!(f, "I/O error: {msg}"),
            GraderError::InvalidJson(msg) => write!(f, "Invalid JSON: {msg}"),
            GraderError::MissingField(field) => write!(f, "Missing field: {field}"),
            GraderError::StoreError(msg) => write!(f, "Problem store error: {msg}"),
            GraderError::ExecutionError(msg) => write!(f, "Execution error: {msg}"),
            GraderError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for GraderError {}

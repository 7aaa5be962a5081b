//!
//! # Executor Trait
//!
//! Remote execution of a submission. Implementations report compile errors, runtime errors,
//! non-zero exits and transport failures as an [`ExecutionResult`] with `succeeded == false`.
//! `Err` is reserved for faults the implementation cannot describe as a failed run; the
//! grader turns those into a zero-score result as well.

use crate::error::GraderError;
use crate::types::ExecutionResult;
use async_trait::async_trait;

#[async_trait]
pub trait Executor: Send + Sync {
    /// Runs `source_code` once, feeding it `stdin` when present.
    async fn execute(
        &self,
        source_code: &str,
        stdin: Option<&str>,
    ) -> Result<ExecutionResult, GraderError>;
}

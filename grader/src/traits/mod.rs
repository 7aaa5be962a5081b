//!
//! Traits Module
//!
//! Seams between the grading orchestrator and the parts it delegates to:
//!
//! - [`comparator`]: strategy for deciding whether two program outputs are equivalent.
//! - [`problem_store`]: lookup of a stored problem record from free-text problem statements.
//! - [`executor`]: remote execution of a submission.
//!
//! Implement these traits to plug in another store, runner or comparison policy.

pub mod comparator;
pub mod executor;
pub mod problem_store;

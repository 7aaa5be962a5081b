//! # Comparators
//!
//! Strategies for deciding whether a submission's output is equivalent to the expected
//! output. All comparators implement [`crate::traits::comparator::OutputComparator`], so the
//! grader can switch policy from configuration.
//!
//! - [`normalized_comparator`]: whitespace-insensitive, content-exact (default).
//! - [`exact_comparator`]: only line endings are unified.

pub mod exact_comparator;
pub mod normalized_comparator;

use crate::traits::comparator::OutputComparator;
use exact_comparator::ExactComparator;
use normalized_comparator::NormalizedComparator;
use util::grading_config::ComparisonScheme;

/// Builds the comparator selected by `scheme`.
pub fn comparator_for(scheme: ComparisonScheme) -> Box<dyn OutputComparator> {
    match scheme {
        ComparisonScheme::Normalized => Box::new(NormalizedComparator),
        ComparisonScheme::Exact => Box::new(ExactComparator),
    }
}

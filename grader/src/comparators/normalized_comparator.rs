//! A comparator that ignores line-ending and whitespace layout but not content.
//!
//! Line endings are unified, runs of horizontal whitespace collapse to one space, trailing
//! whitespace per line and surrounding blank lines are dropped. Differing values, extra or
//! missing lines and reordered lines still count as mismatches.

use crate::traits::comparator::OutputComparator;
use crate::utilities::line_normalization::normalize_output;

pub struct NormalizedComparator;

impl OutputComparator for NormalizedComparator {
    fn normalize(&self, output: &str) -> String {
        normalize_output(output)
    }
}

/// Free-function form of [`NormalizedComparator::outputs_match`].
pub fn outputs_match(actual: &str, expected: &str) -> bool {
    NormalizedComparator.outputs_match(actual, expected)
}

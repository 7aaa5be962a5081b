//! A comparator for outputs where spacing is part of the answer.
//!
//! Only line endings are unified (`\r\n` and `\r` become `\n`); every other character,
//! including trailing spaces and blank lines, must match.

use crate::traits::comparator::OutputComparator;
use crate::utilities::line_normalization::unify_line_endings;

pub struct ExactComparator;

impl OutputComparator for ExactComparator {
    fn normalize(&self, output: &str) -> String {
        unify_line_endings(output)
    }
}

/// OutputComparator is a strategy trait for comparing program outputs.
///
/// Implementations must be symmetric: `outputs_match(a, b) == outputs_match(b, a)`.
pub trait OutputComparator: Send + Sync {
    /// Canonical form of `output` under this strategy.
    fn normalize(&self, output: &str) -> String;

    /// True when `actual` and `expected` are equivalent under this strategy.
    fn outputs_match(&self, actual: &str, expected: &str) -> bool {
        self.normalize(actual) == self.normalize(expected)
    }
}

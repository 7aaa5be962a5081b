//! # Scorer Module
//!
//! Similarity measurement and final score composition.
//!
//! The final score for a scored submission is
//! `round(similarity * similarity_weight) + max(0, structure_weight - penalty)`, clamped to
//! 100. With the default 60/40 split a structurally clean submission always earns the 40
//! structure points, and a heavy structural penalty cannot be hidden by high token overlap.

use std::collections::HashSet;
use util::grading_config::ScoringOptions;

/// Upper bound of every score.
pub const MAX_SCORE: u32 = 100;

/// Jaccard similarity of the case-lowered token sets of `a` and `b`.
///
/// Token frequency and order are ignored. Two empty inputs are identical (`1.0`); exactly one
/// empty input shares nothing (`0.0`).
///
/// # Example
///
/// ```
/// use grader::scorer::token_similarity;
///
/// let a = vec!["int".to_string(), "main".to_string()];
/// let b = vec!["INT".to_string(), "x".to_string()];
/// assert_eq!(token_similarity(&a, &b), 1.0 / 3.0);
/// assert_eq!(token_similarity(&[], &[]), 1.0);
/// ```
pub fn token_similarity(a: &[String], b: &[String]) -> f64 {
    let set_a: HashSet<String> = a.iter().map(|t| t.to_lowercase()).collect();
    let set_b: HashSet<String> = b.iter().map(|t| t.to_lowercase()).collect();

    match (set_a.is_empty(), set_b.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        _ => {}
    }

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    intersection as f64 / union as f64
}

/// Combines similarity and structural penalty into a score in `0..=MAX_SCORE`.
pub fn compose_score(similarity: f64, penalty: u32, weights: &ScoringOptions) -> u32 {
    let similarity = similarity.clamp(0.0, 1.0);
    let similarity_points = (similarity * weights.similarity_weight as f64).round() as u32;
    let structure_points = weights.structure_weight.saturating_sub(penalty);
    (similarity_points + structure_points).min(MAX_SCORE)
}

/// Coarse banding of a score used to word summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// 80 and above.
    Close,
    /// 50 to 79.
    Partial,
    /// Below 50.
    Distant,
}

impl ScoreBand {
    pub fn of(score: u32) -> Self {
        match score {
            s if s >= 80 => ScoreBand::Close,
            s if s >= 50 => ScoreBand::Partial,
            _ => ScoreBand::Distant,
        }
    }
}

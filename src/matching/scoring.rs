use serde::Serialize;

use crate::matching::evaluator::Evaluation;

/// Safely convert usize to f64 for ratio calculations
///
/// Match counts stay far below the 2^53 limit of exact f64 integers.
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// `numerator / denominator`, or 0.0 for an empty denominator
#[inline]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        count_to_f64(numerator) / count_to_f64(denominator)
    }
}

/// Counts and ratios derived from an [`Evaluation`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationSummary {
    pub correct: usize,
    pub wrong: usize,
    pub found_reference: usize,
    pub not_found_reference: usize,
    pub patterns_used: usize,

    /// `correct + not_found_reference + wrong`
    pub total: usize,

    /// Share of `total` that is correct
    pub correct_fraction: f64,

    /// Share of `total` that is a missed reference
    pub not_found_fraction: f64,

    /// Share of `total` that is a wrong detection
    pub wrong_fraction: f64,

    /// Fraction of detections that are correct
    pub precision: f64,

    /// Fraction of reference records that were found
    pub recall: f64,
}

impl EvaluationSummary {
    #[must_use]
    pub fn from_evaluation(evaluation: &Evaluation) -> Self {
        let correct = evaluation.correct.len();
        let wrong = evaluation.wrong.len();
        let found_reference = evaluation.found_reference.len();
        let not_found_reference = evaluation.not_found_reference.len();
        let total = correct + not_found_reference + wrong;

        Self {
            correct,
            wrong,
            found_reference,
            not_found_reference,
            patterns_used: evaluation.patterns_used_count(),
            total,
            correct_fraction: ratio(correct, total),
            not_found_fraction: ratio(not_found_reference, total),
            wrong_fraction: ratio(wrong, total),
            precision: ratio(correct, correct + wrong),
            recall: ratio(found_reference, found_reference + not_found_reference),
        }
    }

    /// True when there is nothing to report
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

use tracing::{debug, info};

use crate::core::record::MatchRecord;
use crate::matching::dedup::deduplicate;
use crate::matching::evaluator::{evaluate, Evaluation};
use crate::matching::scoring::EvaluationSummary;

/// Configuration for the evaluation engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Resolve location collisions among detections before scoring
    pub deduplicate: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { deduplicate: true }
    }
}

/// Result of evaluating one detection set against one reference set
#[derive(Debug, Clone)]
pub struct EvaluationResult {
    /// Number of detections before collision resolution
    pub detected_count: usize,

    /// Detections actually scored
    pub scored_detections: Vec<MatchRecord>,

    pub evaluation: Evaluation,

    pub summary: EvaluationSummary,
}

impl EvaluationResult {
    /// Detections dropped by collision resolution
    #[must_use]
    pub fn collisions_resolved(&self) -> usize {
        self.detected_count - self.scored_detections.len()
    }
}

/// Runs collision resolution followed by classification
pub struct EvaluationEngine {
    config: EngineConfig,
}

impl EvaluationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Evaluate `detected` against `reference`.
    ///
    /// Both collections are only borrowed; the result owns copies of every
    /// record it reports.
    #[must_use]
    pub fn run(&self, detected: &[MatchRecord], reference: &[MatchRecord]) -> EvaluationResult {
        let scored_detections = if self.config.deduplicate {
            deduplicate(detected)
        } else {
            detected.to_vec()
        };

        debug!(
            "Scoring {} of {} detections against {} reference records",
            scored_detections.len(),
            detected.len(),
            reference.len()
        );

        let evaluation = evaluate(&scored_detections, reference);
        let summary = EvaluationSummary::from_evaluation(&evaluation);

        let result = EvaluationResult {
            detected_count: detected.len(),
            scored_detections,
            evaluation,
            summary,
        };

        info!(
            "{} correct, {} wrong, {} references not found ({} collisions resolved)",
            result.summary.correct,
            result.summary.wrong,
            result.summary.not_found_reference,
            result.collisions_resolved()
        );

        result
    }
}

impl Default for EvaluationEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_then_scoring() {
        // A fires three times overall, B once, both claim 0x20
        let detected = vec![
            MatchRecord::new("A", 0, 0x20),
            MatchRecord::new("B", 1, 0x20),
            MatchRecord::new("A", 0, 0x100),
            MatchRecord::new("A", 0, 0x200),
        ];
        let reference = vec![MatchRecord::new("R1", 0, 0x20)];

        let result = EvaluationEngine::default().run(&detected, &reference);

        assert!(result
            .scored_detections
            .contains(&MatchRecord::new("B", 1, 0x20)));
        assert!(!result
            .scored_detections
            .contains(&MatchRecord::new("A", 0, 0x20)));
        assert_eq!(result.evaluation.correct, vec![MatchRecord::new("B", 1, 0x20)]);
        assert_eq!(result.evaluation.wrong.len(), 2);
        assert!(result
            .evaluation
            .wrong
            .iter()
            .all(|r| r.pattern_name == "A" && r.end_location != 0x20));
        assert_eq!(result.collisions_resolved(), 1);
        assert_eq!(result.summary.patterns_used, 1);
    }

    #[test]
    fn test_without_deduplication() {
        let detected = vec![MatchRecord::new("A", 0, 0x20), MatchRecord::new("B", 1, 0x20)];
        let reference = vec![MatchRecord::new("R1", 0, 0x20)];

        let engine = EvaluationEngine::new(EngineConfig { deduplicate: false });
        let result = engine.run(&detected, &reference);

        assert_eq!(result.collisions_resolved(), 0);
        assert_eq!(result.evaluation.correct.len(), 2);
        assert_eq!(result.summary.patterns_used, 2);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let detected = vec![
            MatchRecord::new("x", 0, 0x20),
            MatchRecord::new("y", 0, 0x20),
            MatchRecord::new("z", 0, 0x30),
        ];
        let reference = vec![MatchRecord::new("r", 0, 0x20), MatchRecord::new("s", 0, 0x40)];

        let engine = EvaluationEngine::default();
        let first = engine.run(&detected, &reference);
        let second = engine.run(&detected, &reference);

        assert_eq!(first.evaluation, second.evaluation);
        assert_eq!(first.summary, second.summary);
        assert_eq!(first.evaluation.correct, vec![MatchRecord::new("x", 0, 0x20)]);
    }
}

use std::collections::BTreeMap;

use serde::Serialize;

use super::insights::{Grade, Temperature};
use super::{ScoreResult, ScoringMethod};

/// Aggregate view over a batch of scores, used for pipeline status reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub total: usize,
    pub ml_scored: usize,
    pub rule_based: usize,
    pub ml_coverage_pct: f64,
    pub average_score: f64,
    pub grade_distribution: BTreeMap<&'static str, usize>,
    pub temperature_distribution: BTreeMap<&'static str, usize>,
}

impl ScoreSummary {
    pub fn from_results(results: &[ScoreResult]) -> Self {
        let total = results.len();
        let ml_scored = results
            .iter()
            .filter(|result| result.method == ScoringMethod::Ml)
            .count();

        let mut grade_distribution = BTreeMap::new();
        let mut temperature_distribution = BTreeMap::new();
        let mut score_sum: u64 = 0;

        for result in results {
            score_sum += u64::from(result.value);
            *grade_distribution
                .entry(Grade::from_score(result.value).label())
                .or_insert(0) += 1;
            *temperature_distribution
                .entry(Temperature::from_score(result.value).label())
                .or_insert(0) += 1;
        }

        let (ml_coverage_pct, average_score) = if total > 0 {
            (
                ml_scored as f64 / total as f64 * 100.0,
                score_sum as f64 / total as f64,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            total,
            ml_scored,
            rule_based: total - ml_scored,
            ml_coverage_pct,
            average_score,
            grade_distribution,
            temperature_distribution,
        }
    }
}

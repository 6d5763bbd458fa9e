use chrono::{DateTime, Utc};
use tracing::{debug, error, warn};

use super::config::{ScoringConfig, ScoringWeights};
use super::delegate::MlDelegate;
use super::domain::LeadRecord;
use super::insights::{explain, Insights};
use super::rules::RuleBasedScorer;
use super::ScoreResult;

/// Single entry point for scoring: external model first when configured, rules otherwise.
///
/// Holds only immutable configuration, so one instance can be shared across tasks.
#[derive(Debug, Clone)]
pub struct LeadScoringEngine {
    rules: RuleBasedScorer,
    delegate: Option<MlDelegate>,
}

impl LeadScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        let delegate = match config.ml_service {
            Some(ml) if !ml.base_url.trim().is_empty() && !ml.api_key.trim().is_empty() => {
                match MlDelegate::new(ml) {
                    Ok(delegate) => Some(delegate),
                    Err(err) => {
                        warn!(error = %err, "ml client could not be built; scoring with rules only");
                        None
                    }
                }
            }
            _ => None,
        };

        Self {
            rules: RuleBasedScorer::new(config.weights),
            delegate,
        }
    }

    pub fn rules_only(weights: ScoringWeights) -> Self {
        Self {
            rules: RuleBasedScorer::new(weights),
            delegate: None,
        }
    }

    pub fn ml_enabled(&self) -> bool {
        self.delegate.is_some()
    }

    pub fn score_with_rules(&self, lead: &LeadRecord) -> ScoreResult {
        self.score_with_rules_at(lead, Utc::now())
    }

    pub fn score_with_rules_at(&self, lead: &LeadRecord, now: DateTime<Utc>) -> ScoreResult {
        match self.rules.score(lead, now) {
            Ok(result) => result,
            Err(err) => {
                error!(error = %err, lead_id = ?lead.lead_id(), "rule-based scoring failed; using default score");
                ScoreResult::fallback_default()
            }
        }
    }

    pub async fn calculate_lead_score(&self, lead: &LeadRecord) -> ScoreResult {
        self.calculate_lead_score_at(lead, Utc::now()).await
    }

    pub async fn calculate_lead_score_at(
        &self,
        lead: &LeadRecord,
        now: DateTime<Utc>,
    ) -> ScoreResult {
        match &self.delegate {
            Some(delegate) => match delegate.score(lead, now).await {
                Ok(result) => return result,
                Err(err) => {
                    warn!(error = %err, lead_id = ?lead.lead_id(), "ml scoring failed; falling back to rules");
                }
            },
            None => debug!("ml service not configured; scoring with rules"),
        }

        self.score_with_rules_at(lead, now)
    }

    pub async fn batch_calculate_scores(&self, leads: &[LeadRecord]) -> Vec<ScoreResult> {
        self.batch_calculate_scores_at(leads, Utc::now()).await
    }

    /// Scores `leads` in order. A failed model batch is not retried; each lead is scored with
    /// rules instead.
    pub async fn batch_calculate_scores_at(
        &self,
        leads: &[LeadRecord],
        now: DateTime<Utc>,
    ) -> Vec<ScoreResult> {
        if leads.is_empty() {
            return Vec::new();
        }

        match &self.delegate {
            Some(delegate) => match delegate.batch_score(leads, now).await {
                Ok(results) => return results,
                Err(err) => {
                    warn!(error = %err, count = leads.len(), "ml batch scoring failed; scoring each lead with rules");
                }
            },
            None => debug!(count = leads.len(), "ml service not configured; batch scoring with rules"),
        }

        leads
            .iter()
            .map(|lead| self.score_with_rules_at(lead, now))
            .collect()
    }

    pub fn score_insights(&self, lead: &LeadRecord, score: &ScoreResult) -> Insights {
        explain(lead, score)
    }
}

impl Default for LeadScoringEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

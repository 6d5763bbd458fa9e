//! Lead scoring: feature extraction, the deterministic rule-based scorer, the optional external
//! model delegate, and the insight generator, tied together by [`LeadScoringEngine`].

pub mod config;
mod delegate;
pub mod domain;
mod engine;
pub mod features;
mod insights;
mod rules;
mod summary;

#[cfg(test)]
mod tests;

pub use config::{MlServiceConfig, ScoringConfig, ScoringWeights, WeightsError};
pub use delegate::{MlDelegate, MlDelegateError};
pub use domain::{
    BudgetRange, Company, CompanySize, Industry, Interaction, InteractionOutcome,
    InteractionType, LeadRecord, LeadSource, LeadStatus, Priority, Revenue, Timeline,
};
pub use engine::LeadScoringEngine;
pub use features::{extract, LeadFeatures};
pub use insights::{
    explain, Grade, Insights, Recommendation, RecommendationKind, Temperature,
};
pub use rules::{RuleBasedScorer, BEHAVIORAL, DEMOGRAPHIC, ENGAGEMENT, FIRMOGRAPHIC};
pub use summary::ScoreSummary;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_FACTOR: &str = "default";
const DEFAULT_SCORE: u8 = 50;
const MAX_SCORE: u8 = 100;

/// Which path produced a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoringMethod {
    #[serde(rename = "rule-based")]
    RuleBased,
    #[serde(rename = "ml")]
    Ml,
}

impl ScoringMethod {
    pub const fn label(self) -> &'static str {
        match self {
            ScoringMethod::RuleBased => "rule-based",
            ScoringMethod::Ml => "ml",
        }
    }
}

/// One named, weighted contributor to a rule-based score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreFactor {
    pub name: String,
    pub weight: f64,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ScoreFactor {
    pub fn new(name: &str, weight: f64, score: f64, details: &str) -> Self {
        Self {
            name: name.to_string(),
            weight,
            score,
            details: Some(details.to_string()),
        }
    }
}

/// Entry in [`ScoreResult::factors`]. Model factors are kept exactly as the model sent them,
/// whatever their shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Factor {
    Rule(ScoreFactor),
    Model(Value),
}

impl Factor {
    pub fn as_rule(&self) -> Option<&ScoreFactor> {
        match self {
            Factor::Rule(factor) => Some(factor),
            Factor::Model(_) => None,
        }
    }
}

impl From<ScoreFactor> for Factor {
    fn from(value: ScoreFactor) -> Self {
        Factor::Rule(value)
    }
}

/// Score handed back to the caller. Built fresh on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    #[serde(deserialize_with = "score_value")]
    pub value: u8,
    pub factors: Vec<Factor>,
    pub method: ScoringMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl ScoreResult {
    /// Minimal result substituted when the rule-based computation itself fails.
    pub fn fallback_default() -> Self {
        Self {
            value: DEFAULT_SCORE,
            factors: vec![ScoreFactor::new(
                DEFAULT_FACTOR,
                1.0,
                DEFAULT_SCORE as f64,
                "Default score applied because the lead could not be scored",
            )
            .into()],
            method: ScoringMethod::RuleBased,
            model_version: None,
            confidence: None,
        }
    }

    /// Sum of the rule factor weights. Model factors carry no weight contract and are skipped.
    pub fn factor_weight_total(&self) -> f64 {
        self.factors
            .iter()
            .filter_map(Factor::as_rule)
            .map(|factor| factor.weight)
            .sum()
    }

    pub(crate) fn bounded(raw: f64) -> u8 {
        raw.clamp(0.0, f64::from(MAX_SCORE)).round() as u8
    }
}

fn score_value<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = u8::deserialize(deserializer)?;
    if value > MAX_SCORE {
        return Err(serde::de::Error::custom(format!(
            "score {value} outside 0-{MAX_SCORE}"
        )));
    }
    Ok(value)
}

/// Internal failure of the rule-based computation. Never surfaces past the engine.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error(transparent)]
    Weights(#[from] WeightsError),
    #[error("weighted score is not a finite number")]
    NonFinite,
}

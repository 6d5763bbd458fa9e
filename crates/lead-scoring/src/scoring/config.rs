use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_ML_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_ML_BATCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Relative weight of each sub-score in the combined rule-based score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub demographic: f64,
    pub behavioral: f64,
    pub firmographic: f64,
    pub engagement: f64,
}

impl ScoringWeights {
    pub const TOLERANCE: f64 = 0.001;

    pub fn new(
        demographic: f64,
        behavioral: f64,
        firmographic: f64,
        engagement: f64,
    ) -> Result<Self, WeightsError> {
        let weights = Self {
            demographic,
            behavioral,
            firmographic,
            engagement,
        };
        weights.validate()?;
        Ok(weights)
    }

    pub fn total(&self) -> f64 {
        self.demographic + self.behavioral + self.firmographic + self.engagement
    }

    pub fn validate(&self) -> Result<(), WeightsError> {
        let all = [
            self.demographic,
            self.behavioral,
            self.firmographic,
            self.engagement,
        ];
        if all.iter().any(|weight| !weight.is_finite() || *weight < 0.0) {
            return Err(WeightsError::OutOfRange);
        }

        let total = self.total();
        if (total - 1.0).abs() > Self::TOLERANCE {
            return Err(WeightsError::Unbalanced { total });
        }

        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            demographic: 0.25,
            behavioral: 0.30,
            firmographic: 0.25,
            engagement: 0.20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightsError {
    #[error("scoring weights must be finite and non-negative")]
    OutOfRange,
    #[error("scoring weights sum to {total:.3}, expected 1.0")]
    Unbalanced { total: f64 },
}

/// Endpoint and credential for the external conversion model.
#[derive(Debug, Clone, PartialEq)]
pub struct MlServiceConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
    pub batch_timeout: Duration,
}

impl MlServiceConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_ML_TIMEOUT,
            batch_timeout: DEFAULT_ML_BATCH_TIMEOUT,
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Immutable configuration shared by every scoring call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    pub ml_service: Option<MlServiceConfig>,
}

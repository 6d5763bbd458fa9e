use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::MlServiceConfig;
use super::domain::LeadRecord;
use super::features::{extract, LeadFeatures};
use super::{Factor, ScoreResult, ScoringMethod};

const SINGLE_PATH: &str = "predict/lead-score";
const BATCH_PATH: &str = "predict/batch-lead-score";

/// HTTP client for the external conversion model.
#[derive(Debug, Clone)]
pub struct MlDelegate {
    client: Client,
    config: MlServiceConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum MlDelegateError {
    #[error("ml service did not answer within {0:?}")]
    Timeout(Duration),
    #[error("ml service request failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error("ml service returned HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("ml service response malformed: {0}")]
    Malformed(String),
    #[error("ml service returned {received} results for {expected} leads")]
    BatchMismatch { expected: usize, received: usize },
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    features: &'a LeadFeatures,
    #[serde(skip_serializing_if = "Option::is_none")]
    lead_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct BatchPredictRequest {
    leads: Vec<BatchLead>,
}

#[derive(Debug, Serialize)]
struct BatchLead {
    #[serde(skip_serializing_if = "Option::is_none")]
    lead_id: Option<String>,
    features: LeadFeatures,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    factors: Value,
    #[serde(default)]
    model_version: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct BatchPredictResponse {
    results: Vec<PredictResponse>,
}

impl PredictResponse {
    fn into_score(self) -> Result<ScoreResult, MlDelegateError> {
        let score = self
            .score
            .ok_or_else(|| MlDelegateError::Malformed("missing score".to_string()))?;
        if !score.is_finite() || !(0.0..=100.0).contains(&score) {
            return Err(MlDelegateError::Malformed(format!(
                "score {score} outside 0-100"
            )));
        }

        Ok(ScoreResult {
            value: score.round() as u8,
            factors: model_factors(self.factors),
            method: ScoringMethod::Ml,
            model_version: self.model_version,
            confidence: self.confidence.filter(|confidence| confidence.is_finite()),
        })
    }
}

/// Model factors have no fixed shape; each entry is kept verbatim.
fn model_factors(raw: Value) -> Vec<Factor> {
    match raw {
        Value::Null => Vec::new(),
        Value::Array(entries) => entries.into_iter().map(Factor::Model).collect(),
        other => vec![Factor::Model(other)],
    }
}

impl MlDelegate {
    pub fn new(config: MlServiceConfig) -> Result<Self, MlDelegateError> {
        let client = Client::builder().build().map_err(MlDelegateError::Network)?;
        Ok(Self { client, config })
    }

    pub async fn score(
        &self,
        lead: &LeadRecord,
        now: DateTime<Utc>,
    ) -> Result<ScoreResult, MlDelegateError> {
        let features = extract(lead, now);
        let body = PredictRequest {
            features: &features,
            lead_id: lead.lead_id(),
        };

        let request = self
            .client
            .post(self.config.endpoint(SINGLE_PATH))
            .json(&body);
        let response: PredictResponse = self.send(request, self.config.timeout).await?;
        response.into_score()
    }

    pub async fn batch_score(
        &self,
        leads: &[LeadRecord],
        now: DateTime<Utc>,
    ) -> Result<Vec<ScoreResult>, MlDelegateError> {
        let body = BatchPredictRequest {
            leads: leads
                .iter()
                .map(|lead| BatchLead {
                    lead_id: lead.lead_id(),
                    features: extract(lead, now),
                })
                .collect(),
        };

        let request = self
            .client
            .post(self.config.endpoint(BATCH_PATH))
            .json(&body);
        let response: BatchPredictResponse =
            self.send(request, self.config.batch_timeout).await?;

        if response.results.len() != leads.len() {
            return Err(MlDelegateError::BatchMismatch {
                expected: leads.len(),
                received: response.results.len(),
            });
        }

        response
            .results
            .into_iter()
            .map(PredictResponse::into_score)
            .collect()
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        timeout: Duration,
    ) -> Result<T, MlDelegateError> {
        let classify = |err: reqwest::Error| {
            if err.is_timeout() {
                MlDelegateError::Timeout(timeout)
            } else {
                MlDelegateError::Network(err)
            }
        };

        let response = request
            .bearer_auth(&self.config.api_key)
            .timeout(timeout)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        let body = response.text().await.map_err(classify)?;

        if !status.is_success() {
            return Err(MlDelegateError::Status { status, body });
        }

        serde_json::from_str(&body).map_err(|err| MlDelegateError::Malformed(err.to_string()))
    }
}

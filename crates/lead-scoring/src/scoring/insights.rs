use serde::{Deserialize, Serialize};

use super::domain::{BudgetRange, LeadRecord, Timeline};
use super::{Factor, ScoreResult};

const PRIORITY_CONTACT_THRESHOLD: u8 = 80;

/// Letter grade derived from the score, inclusive lower bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => Grade::APlus,
            80..=89 => Grade::A,
            70..=79 => Grade::B,
            60..=69 => Grade::C,
            50..=59 => Grade::D,
            _ => Grade::F,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

/// Coarse hot/warm/cold bucket used by the sales dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Temperature {
    Hot,
    Warm,
    Cold,
}

impl Temperature {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Temperature::Hot,
            50..=79 => Temperature::Warm,
            _ => Temperature::Cold,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Temperature::Hot => "Hot",
            Temperature::Warm => "Warm",
            Temperature::Cold => "Cold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Priority,
    Qualification,
    Engagement,
}

/// Next qualification step suggested to the sales rep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub message: String,
    pub action: String,
}

impl Recommendation {
    fn new(kind: RecommendationKind, message: &str, action: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
            action: action.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub score: u8,
    pub grade: Grade,
    pub temperature: Temperature,
    pub factors: Vec<Factor>,
    pub recommendations: Vec<Recommendation>,
}

pub fn explain(lead: &LeadRecord, score: &ScoreResult) -> Insights {
    let mut recommendations = Vec::new();

    if score.value >= PRIORITY_CONTACT_THRESHOLD {
        recommendations.push(Recommendation::new(
            RecommendationKind::Priority,
            "High-value lead: prioritize immediate contact",
            "Schedule a call within 24 hours",
        ));
    }

    if !lead.decision_maker {
        recommendations.push(Recommendation::new(
            RecommendationKind::Qualification,
            "Decision maker has not been identified",
            "Ask about the decision-making process and key stakeholders",
        ));
    }

    if lead.timeline == Timeline::Unknown {
        recommendations.push(Recommendation::new(
            RecommendationKind::Qualification,
            "Purchase timeline is unclear",
            "Clarify the expected purchase timeline",
        ));
    }

    if lead.budget == BudgetRange::Unknown {
        recommendations.push(Recommendation::new(
            RecommendationKind::Qualification,
            "Budget information is missing",
            "Understand the budget range and approval process",
        ));
    }

    if lead.interactions.is_empty() {
        recommendations.push(Recommendation::new(
            RecommendationKind::Engagement,
            "No interactions recorded yet",
            "Initiate first contact",
        ));
    }

    Insights {
        score: score.value,
        grade: Grade::from_score(score.value),
        temperature: Temperature::from_score(score.value),
        factors: score.factors.clone(),
        recommendations,
    }
}

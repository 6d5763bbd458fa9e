use chrono::{DateTime, Duration, Utc};

use super::config::ScoringWeights;
use super::domain::{
    BudgetRange, CompanySize, Industry, InteractionOutcome, LeadRecord, LeadSource, Priority,
    Revenue, Timeline,
};
use super::{Factor, ScoreFactor, ScoreResult, ScoringError, ScoringMethod};

const BASE_SCORE: i64 = 50;
const RECENT_WINDOW_DAYS: i64 = 30;
const INTERACTION_POINTS: i64 = 3;
const INTERACTION_CAP: i64 = 20;
const POSITIVE_OUTCOME_POINTS: i64 = 5;
const RECENT_INTERACTION_POINTS: i64 = 3;

pub const DEMOGRAPHIC: &str = "Demographic";
pub const BEHAVIORAL: &str = "Behavioral";
pub const FIRMOGRAPHIC: &str = "Firmographic";
pub const ENGAGEMENT: &str = "Engagement";

const EXECUTIVE_ACRONYMS: [&str; 6] = ["ceo", "cto", "cfo", "coo", "cmo", "cio"];
const EXECUTIVE_TERMS: [&str; 3] = ["chief", "founder", "owner"];
const VP_ACRONYMS: [&str; 3] = ["vp", "svp", "evp"];
const DIRECTOR_TERMS: [&str; 3] = ["director", "manager", "head"];

/// Deterministic scorer combining four additive sub-scores with fixed weights.
#[derive(Debug, Clone)]
pub struct RuleBasedScorer {
    weights: ScoringWeights,
}

impl RuleBasedScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn score(
        &self,
        lead: &LeadRecord,
        now: DateTime<Utc>,
    ) -> Result<ScoreResult, ScoringError> {
        self.weights.validate()?;

        let factors = vec![
            ScoreFactor::new(
                DEMOGRAPHIC,
                self.weights.demographic,
                demographic_score(lead),
                "Job title seniority, decision-making authority and company size",
            ),
            ScoreFactor::new(
                BEHAVIORAL,
                self.weights.behavioral,
                behavioral_score(lead),
                "Lead source, purchase timeline and budget",
            ),
            ScoreFactor::new(
                FIRMOGRAPHIC,
                self.weights.firmographic,
                firmographic_score(lead),
                "Industry, annual revenue and company profile",
            ),
            ScoreFactor::new(
                ENGAGEMENT,
                self.weights.engagement,
                engagement_score(lead, now),
                "Interaction volume, outcomes, recency and priority",
            ),
        ];

        let weighted: f64 = factors
            .iter()
            .map(|factor| factor.score * factor.weight)
            .sum();
        if !weighted.is_finite() {
            return Err(ScoringError::NonFinite);
        }

        Ok(ScoreResult {
            value: ScoreResult::bounded(weighted),
            factors: factors.into_iter().map(Factor::from).collect(),
            method: ScoringMethod::RuleBased,
            model_version: None,
            confidence: None,
        })
    }
}

impl Default for RuleBasedScorer {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TitleTier {
    Executive,
    VicePresident,
    Director,
}

pub(crate) fn title_tier(title: &str) -> Option<TitleTier> {
    let lowered = title.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();
    let (president, vice_president) = president_mentions(&lowered);

    if EXECUTIVE_ACRONYMS.iter().any(|acronym| words.contains(acronym))
        || EXECUTIVE_TERMS.iter().any(|term| lowered.contains(term))
        || president
    {
        return Some(TitleTier::Executive);
    }

    if VP_ACRONYMS.iter().any(|acronym| words.contains(acronym)) || vice_president {
        return Some(TitleTier::VicePresident);
    }

    if DIRECTOR_TERMS.iter().any(|term| lowered.contains(term)) {
        return Some(TitleTier::Director);
    }

    None
}

/// Returns (plain president, vice president) mentions in a lower-cased title.
fn president_mentions(lowered: &str) -> (bool, bool) {
    let mut president = false;
    let mut vice_president = false;
    for (idx, _) in lowered.match_indices("president") {
        let preceding = lowered[..idx].trim_end_matches(|c: char| !c.is_alphanumeric());
        if preceding.ends_with("vice") {
            vice_president = true;
        } else {
            president = true;
        }
    }
    (president, vice_president)
}

pub(crate) fn demographic_score(lead: &LeadRecord) -> f64 {
    let mut score = BASE_SCORE;

    score += match lead.job_title.as_deref().and_then(title_tier) {
        Some(TitleTier::Executive) => 20,
        Some(TitleTier::VicePresident) => 18,
        Some(TitleTier::Director) => 15,
        None => 0,
    };

    if lead.decision_maker {
        score += 15;
    }

    score += match lead.company.size {
        CompanySize::Enterprise => 15,
        CompanySize::Large => 12,
        CompanySize::Medium => 8,
        CompanySize::Small => 5,
        CompanySize::Micro | CompanySize::Unknown => 0,
    };

    bounded_subscore(score)
}

pub(crate) fn behavioral_score(lead: &LeadRecord) -> f64 {
    let mut score = BASE_SCORE;

    score += match lead.source {
        LeadSource::Referral => 20,
        LeadSource::Website => 15,
        LeadSource::SocialMedia => 10,
        LeadSource::EmailCampaign => 8,
        LeadSource::ColdCall => -5,
        LeadSource::TradeShow | LeadSource::Other | LeadSource::Unknown => 5,
    };

    score += match lead.timeline {
        Timeline::Immediate => 25,
        Timeline::OneToThreeMonths => 20,
        Timeline::ThreeToSixMonths => 10,
        Timeline::SixToTwelveMonths => 5,
        Timeline::OverTwelveMonths | Timeline::Unknown => -5,
    };

    score += match lead.budget {
        BudgetRange::Over500K => 25,
        BudgetRange::From100KTo500K => 20,
        BudgetRange::From50KTo100K => 15,
        BudgetRange::From10KTo50K => 10,
        BudgetRange::Under10K => 5,
        BudgetRange::Unknown => -5,
    };

    bounded_subscore(score)
}

pub(crate) fn firmographic_score(lead: &LeadRecord) -> f64 {
    let mut score = BASE_SCORE;

    score += match lead.company.industry {
        Industry::Technology => 15,
        Industry::Healthcare | Industry::Finance => 12,
        Industry::Education | Industry::Manufacturing => 8,
        _ => 5,
    };

    score += match lead.company.revenue {
        Revenue::Over200M => 20,
        Revenue::From50MTo200M => 15,
        Revenue::From10MTo50M => 10,
        Revenue::From1MTo10M => 5,
        Revenue::Under1M | Revenue::Unknown => 0,
    };

    if lead.company.has_name() {
        score += 5;
    }

    bounded_subscore(score)
}

pub(crate) fn engagement_score(lead: &LeadRecord, now: DateTime<Utc>) -> f64 {
    let mut score = BASE_SCORE;
    let interactions = &lead.interactions;

    let volume = (interactions.len() as i64).saturating_mul(INTERACTION_POINTS);
    score += volume.min(INTERACTION_CAP);

    let positive = interactions
        .iter()
        .filter(|interaction| interaction.outcome == InteractionOutcome::Positive)
        .count() as i64;
    score = score.saturating_add(positive.saturating_mul(POSITIVE_OUTCOME_POINTS));

    let recent_cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
    let recent = interactions
        .iter()
        .filter(|interaction| interaction.date > recent_cutoff)
        .count() as i64;
    score = score.saturating_add(recent.saturating_mul(RECENT_INTERACTION_POINTS));

    score += match lead.priority {
        Priority::Critical => 15,
        Priority::High => 10,
        Priority::Medium | Priority::Unknown => 0,
        Priority::Low => -5,
    };

    bounded_subscore(score)
}

fn bounded_subscore(score: i64) -> f64 {
    score.clamp(0, 100) as f64
}

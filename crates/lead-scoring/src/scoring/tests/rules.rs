use super::common::*;
use crate::scoring::domain::{CompanySize, InteractionOutcome, LeadSource, Priority};
use crate::scoring::rules::{
    behavioral_score, demographic_score, engagement_score, firmographic_score, title_tier,
    TitleTier,
};
use crate::scoring::{
    Grade, RuleBasedScorer, ScoringError, ScoringMethod, ScoringWeights, BEHAVIORAL,
    DEMOGRAPHIC, ENGAGEMENT, FIRMOGRAPHIC,
};

#[test]
fn executive_decision_maker_at_enterprise_caps_demographic() {
    let mut lead = bare_lead("ceo@globex.com");
    lead.job_title = Some("CEO".to_string());
    lead.decision_maker = true;
    lead.company.size = CompanySize::Enterprise;

    assert_eq!(demographic_score(&lead), 100.0);

    let result = RuleBasedScorer::default()
        .score(&lead, now())
        .expect("default weights are valid");
    let demographic = result
        .factors
        .iter()
        .filter_map(|factor| factor.as_rule())
        .find(|factor| factor.name == DEMOGRAPHIC)
        .expect("demographic factor present");
    assert!((demographic.score * demographic.weight - 25.0).abs() < 1e-9);
}

#[test]
fn cold_call_without_timeline_or_budget_scores_35() {
    let mut lead = bare_lead("prospect@initech.com");
    lead.source = LeadSource::ColdCall;

    assert_eq!(behavioral_score(&lead), 35.0);
}

#[test]
fn bare_lead_lands_on_grade_d() {
    let lead = bare_lead("casey@example.org");

    assert_eq!(demographic_score(&lead), 50.0);
    assert_eq!(behavioral_score(&lead), 45.0);
    assert_eq!(firmographic_score(&lead), 55.0);
    assert_eq!(engagement_score(&lead, now()), 50.0);

    let result = RuleBasedScorer::default()
        .score(&lead, now())
        .expect("scores");
    assert_eq!(result.value, 50);
    assert_eq!(Grade::from_score(result.value), Grade::D);
}

#[test]
fn factors_are_ordered_and_weights_sum_to_one() {
    let result = RuleBasedScorer::default()
        .score(&executive_lead(), now())
        .expect("scores");

    let factors: Vec<_> = result
        .factors
        .iter()
        .filter_map(|factor| factor.as_rule())
        .collect();
    let names: Vec<&str> = factors.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec![DEMOGRAPHIC, BEHAVIORAL, FIRMOGRAPHIC, ENGAGEMENT]);
    assert!((result.factor_weight_total() - 1.0).abs() < ScoringWeights::TOLERANCE);
    assert!(factors.iter().all(|f| f.details.is_some()));
    assert_eq!(result.method, ScoringMethod::RuleBased);
    assert!(result.model_version.is_none());
    assert!(result.confidence.is_none());
}

#[test]
fn strong_and_weak_leads_land_at_opposite_ends() {
    let scorer = RuleBasedScorer::default();

    let strong = scorer.score(&executive_lead(), now()).expect("scores");
    assert_eq!(strong.value, 96);

    let weak = scorer.score(&cold_lead(), now()).expect("scores");
    assert_eq!(weak.value, 46);
}

#[test]
fn scoring_is_idempotent_for_a_fixed_instant() {
    let scorer = RuleBasedScorer::default();
    let lead = executive_lead();

    let first = scorer.score(&lead, now()).expect("scores");
    let second = scorer.score(&lead, now()).expect("scores");

    assert_eq!(first, second);
}

#[test]
fn title_acronyms_match_whole_words_only() {
    assert_eq!(title_tier("CTO"), Some(TitleTier::Executive));
    assert_eq!(title_tier("Co-Founder"), Some(TitleTier::Executive));
    assert_eq!(title_tier("President"), Some(TitleTier::Executive));
    assert_eq!(title_tier("Vice President, Sales"), Some(TitleTier::VicePresident));
    assert_eq!(title_tier("SVP Operations"), Some(TitleTier::VicePresident));
    assert_eq!(title_tier("Director of Engineering"), Some(TitleTier::Director));
    assert_eq!(title_tier("Head of Growth"), Some(TitleTier::Director));
    assert_eq!(title_tier("Doctor of Pharmacy"), None);
    assert_eq!(title_tier("Account Executive"), None);
}

#[test]
fn interaction_volume_is_capped() {
    let mut lead = bare_lead("busy@example.org");
    lead.priority = Priority::Medium;
    lead.interactions = (0..10)
        .map(|_| interaction(InteractionOutcome::NoResponse, 90))
        .collect();

    assert_eq!(engagement_score(&lead, now()), 70.0);
}

#[test]
fn recency_window_is_strictly_thirty_days() {
    let mut lead = bare_lead("recent@example.org");
    lead.interactions = vec![interaction(InteractionOutcome::Neutral, 29)];
    assert_eq!(engagement_score(&lead, now()), 56.0);

    lead.interactions = vec![interaction(InteractionOutcome::Neutral, 30)];
    assert_eq!(engagement_score(&lead, now()), 53.0);
}

#[test]
fn engagement_is_clamped_to_100() {
    let mut lead = bare_lead("fan@example.org");
    lead.priority = Priority::Critical;
    lead.interactions = (0..8)
        .map(|day| interaction(InteractionOutcome::Positive, day))
        .collect();

    assert_eq!(engagement_score(&lead, now()), 100.0);
}

#[test]
fn unbalanced_weights_are_reported_not_panicked() {
    let scorer = RuleBasedScorer::new(unbalanced_weights());

    match scorer.score(&executive_lead(), now()) {
        Err(ScoringError::Weights(_)) => {}
        other => panic!("expected weights error, got {other:?}"),
    }
}

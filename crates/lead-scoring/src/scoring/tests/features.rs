use chrono::Duration;

use super::common::*;
use crate::scoring::domain::{BudgetRange, Priority, Revenue, Timeline};
use crate::scoring::extract;

#[test]
fn bare_lead_maps_to_unknown_entries() {
    let features = extract(&bare_lead("casey@example.org"), now());

    assert!(!features.has_job_title);
    assert!(!features.is_decision_maker);
    assert_eq!(features.company_size_numeric, 0);
    assert_eq!(features.source_score, 40);
    assert_eq!(features.industry_score, 40);
    assert_eq!(features.timeline_urgency, 0);
    assert_eq!(features.budget_numeric, 0);
    assert_eq!(features.revenue_numeric, 0);
    assert_eq!(features.priority_numeric, 0);
    assert_eq!(features.interaction_count, 0);
    assert_eq!(features.positive_interactions, 0);
    assert_eq!(features.days_since_creation, 0);
    assert!(!features.has_phone);
    assert!(!features.has_notes);
    assert_eq!(features.tag_count, 0);
    assert!(features.business_email);
}

#[test]
fn populated_lead_uses_range_midpoints() {
    let features = extract(&executive_lead(), now());

    assert!(features.has_job_title);
    assert!(features.is_decision_maker);
    assert_eq!(features.company_size_numeric, 5000);
    assert_eq!(features.source_score, 90);
    assert_eq!(features.industry_score, 85);
    assert_eq!(features.timeline_urgency, 100);
    assert_eq!(features.budget_numeric, 750_000);
    assert_eq!(features.revenue_numeric, 300_000_000);
    assert_eq!(features.priority_numeric, 4);
    assert_eq!(features.interaction_count, 3);
    assert_eq!(features.positive_interactions, 2);
    assert_eq!(features.days_since_creation, 20);
    assert!(features.has_phone);
    assert!(features.has_notes);
    assert_eq!(features.tag_count, 2);
}

#[test]
fn mid_range_categories_encode_numerically() {
    let mut lead = bare_lead("ops@initech.com");
    lead.budget = BudgetRange::From10KTo50K;
    lead.company.revenue = Revenue::From1MTo10M;
    lead.timeline = Timeline::ThreeToSixMonths;
    lead.priority = Priority::Medium;

    let features = extract(&lead, now());
    assert_eq!(features.budget_numeric, 30_000);
    assert_eq!(features.revenue_numeric, 5_500_000);
    assert_eq!(features.timeline_urgency, 60);
    assert_eq!(features.priority_numeric, 2);
}

#[test]
fn days_since_creation_floors_partial_days() {
    let mut lead = bare_lead("casey@example.org");
    lead.created_at = Some(now() - Duration::hours(47));
    assert_eq!(extract(&lead, now()).days_since_creation, 1);

    lead.created_at = Some(now() + Duration::hours(1));
    assert_eq!(extract(&lead, now()).days_since_creation, -1);
}

#[test]
fn free_mail_and_missing_domains_are_not_business_email() {
    assert!(!extract(&cold_lead(), now()).business_email);
    assert!(!extract(&bare_lead("casey"), now()).business_email);
    assert!(!extract(&bare_lead("Casey@Outlook.com"), now()).business_email);
}

#[test]
fn features_serialize_with_snake_case_keys() {
    let value = serde_json::to_value(extract(&executive_lead(), now())).expect("serializes");
    assert_eq!(value["company_size_numeric"], 5000);
    assert_eq!(value["is_decision_maker"], true);
    assert_eq!(value.as_object().map(|fields| fields.len()), Some(16));
}

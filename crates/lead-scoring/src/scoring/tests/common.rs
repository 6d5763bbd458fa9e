use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::scoring::domain::{
    BudgetRange, Company, CompanySize, Industry, Interaction, InteractionOutcome,
    InteractionType, LeadRecord, LeadSource, Priority, Revenue, Timeline,
};
use crate::scoring::{MlServiceConfig, ScoringConfig, ScoringWeights};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn days_ago(days: i64) -> DateTime<Utc> {
    now() - Duration::days(days)
}

/// Identity fields only; every optional field left at its default.
pub(super) fn bare_lead(email: &str) -> LeadRecord {
    LeadRecord {
        email: email.to_string(),
        first_name: "Casey".to_string(),
        last_name: "Morgan".to_string(),
        ..LeadRecord::default()
    }
}

pub(super) fn interaction(outcome: InteractionOutcome, age_days: i64) -> Interaction {
    Interaction {
        kind: InteractionType::Call,
        date: days_ago(age_days),
        outcome,
        notes: None,
        scheduled_date: None,
    }
}

pub(super) fn executive_lead() -> LeadRecord {
    LeadRecord {
        id: Some("lead-exec".to_string()),
        phone: Some("+1 555 0142".to_string()),
        job_title: Some("Chief Revenue Officer".to_string()),
        company: Company {
            name: Some("Northwind Analytics".to_string()),
            industry: Industry::Technology,
            size: CompanySize::Enterprise,
            revenue: Revenue::Over200M,
        },
        source: LeadSource::Referral,
        priority: Priority::Critical,
        budget: BudgetRange::Over500K,
        timeline: Timeline::Immediate,
        decision_maker: true,
        interactions: vec![
            interaction(InteractionOutcome::Positive, 2),
            interaction(InteractionOutcome::Positive, 5),
            interaction(InteractionOutcome::Neutral, 12),
        ],
        notes: Some("Asked for a pilot proposal".to_string()),
        tags: vec!["enterprise".to_string(), "q4".to_string()],
        created_at: Some(days_ago(20)),
        ..bare_lead("avery@northwind.io")
    }
}

pub(super) fn cold_lead() -> LeadRecord {
    LeadRecord {
        job_title: Some("Intern".to_string()),
        company: Company {
            industry: Industry::Retail,
            size: CompanySize::Micro,
            ..Company::default()
        },
        source: LeadSource::ColdCall,
        priority: Priority::Low,
        timeline: Timeline::OverTwelveMonths,
        ..bare_lead("sam@gmail.com")
    }
}

pub(super) fn ml_config(base_url: &str) -> MlServiceConfig {
    let mut config = MlServiceConfig::new(base_url, "test-key");
    config.timeout = std::time::Duration::from_millis(200);
    config.batch_timeout = std::time::Duration::from_millis(200);
    config
}

pub(super) fn ml_scoring_config(base_url: &str) -> ScoringConfig {
    ScoringConfig {
        weights: ScoringWeights::default(),
        ml_service: Some(ml_config(base_url)),
    }
}

pub(super) fn unbalanced_weights() -> ScoringWeights {
    ScoringWeights {
        demographic: 0.5,
        behavioral: 0.5,
        firmographic: 0.5,
        engagement: 0.5,
    }
}

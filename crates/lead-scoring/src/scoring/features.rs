use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    BudgetRange, CompanySize, Industry, InteractionOutcome, LeadRecord, LeadSource, Priority,
    Revenue, Timeline,
};

const FREE_MAIL_DOMAINS: [&str; 4] = ["gmail.com", "yahoo.com", "hotmail.com", "outlook.com"];
const SECONDS_PER_DAY: i64 = 86_400;

/// Fixed-shape numeric encoding of a lead, sent as the payload to the external model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadFeatures {
    pub has_job_title: bool,
    pub is_decision_maker: bool,
    pub company_size_numeric: u32,
    pub source_score: u8,
    pub industry_score: u8,
    pub timeline_urgency: u8,
    pub budget_numeric: u64,
    pub revenue_numeric: u64,
    pub priority_numeric: u8,
    pub interaction_count: u32,
    pub positive_interactions: u32,
    pub days_since_creation: i64,
    pub has_phone: bool,
    pub has_notes: bool,
    pub tag_count: u32,
    pub business_email: bool,
}

/// Encode `lead` as of `now`. Total: every missing field maps to its table's unknown entry.
pub fn extract(lead: &LeadRecord, now: DateTime<Utc>) -> LeadFeatures {
    let positive_interactions = lead
        .interactions
        .iter()
        .filter(|interaction| interaction.outcome == InteractionOutcome::Positive)
        .count() as u32;

    let days_since_creation = lead
        .created_at
        .map(|created| (now - created).num_seconds().div_euclid(SECONDS_PER_DAY))
        .unwrap_or(0);

    let business_email = lead
        .email_domain()
        .map(|domain| {
            let domain = domain.to_ascii_lowercase();
            !FREE_MAIL_DOMAINS.contains(&domain.as_str())
        })
        .unwrap_or(false);

    LeadFeatures {
        has_job_title: lead.has_job_title(),
        is_decision_maker: lead.decision_maker,
        company_size_numeric: company_size_midpoint(lead.company.size),
        source_score: source_score(lead.source),
        industry_score: industry_score(lead.company.industry),
        timeline_urgency: timeline_urgency(lead.timeline),
        budget_numeric: budget_midpoint(lead.budget),
        revenue_numeric: revenue_midpoint(lead.company.revenue),
        priority_numeric: priority_rank(lead.priority),
        interaction_count: lead.interactions.len() as u32,
        positive_interactions,
        days_since_creation,
        has_phone: lead.has_phone(),
        has_notes: lead.has_notes(),
        tag_count: lead.tags.len() as u32,
        business_email,
    }
}

pub(crate) fn company_size_midpoint(size: CompanySize) -> u32 {
    match size {
        CompanySize::Micro => 5,
        CompanySize::Small => 30,
        CompanySize::Medium => 125,
        CompanySize::Large => 600,
        CompanySize::Enterprise => 5000,
        CompanySize::Unknown => 0,
    }
}

pub(crate) fn source_score(source: LeadSource) -> u8 {
    match source {
        LeadSource::Referral => 90,
        LeadSource::Website => 75,
        LeadSource::TradeShow => 70,
        LeadSource::SocialMedia => 60,
        LeadSource::EmailCampaign => 55,
        LeadSource::ColdCall => 30,
        LeadSource::Other | LeadSource::Unknown => 40,
    }
}

pub(crate) fn industry_score(industry: Industry) -> u8 {
    match industry {
        Industry::Technology => 85,
        Industry::Finance | Industry::Healthcare => 75,
        Industry::Consulting => 65,
        Industry::Education | Industry::Manufacturing => 60,
        Industry::RealEstate => 55,
        Industry::Retail => 50,
        Industry::Other | Industry::Unknown => 40,
    }
}

pub(crate) fn timeline_urgency(timeline: Timeline) -> u8 {
    match timeline {
        Timeline::Immediate => 100,
        Timeline::OneToThreeMonths => 80,
        Timeline::ThreeToSixMonths => 60,
        Timeline::SixToTwelveMonths => 40,
        Timeline::OverTwelveMonths => 20,
        Timeline::Unknown => 0,
    }
}

pub(crate) fn budget_midpoint(budget: BudgetRange) -> u64 {
    match budget {
        BudgetRange::Under10K => 5_000,
        BudgetRange::From10KTo50K => 30_000,
        BudgetRange::From50KTo100K => 75_000,
        BudgetRange::From100KTo500K => 300_000,
        BudgetRange::Over500K => 750_000,
        BudgetRange::Unknown => 0,
    }
}

pub(crate) fn revenue_midpoint(revenue: Revenue) -> u64 {
    match revenue {
        Revenue::Under1M => 500_000,
        Revenue::From1MTo10M => 5_500_000,
        Revenue::From10MTo50M => 30_000_000,
        Revenue::From50MTo200M => 125_000_000,
        Revenue::Over200M => 300_000_000,
        Revenue::Unknown => 0,
    }
}

pub(crate) fn priority_rank(priority: Priority) -> u8 {
    match priority {
        Priority::Low => 1,
        Priority::Medium => 2,
        Priority::High => 3,
        Priority::Critical => 4,
        Priority::Unknown => 0,
    }
}

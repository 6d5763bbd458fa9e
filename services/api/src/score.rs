use crate::infra::{load_leads, parse_timestamp};
use chrono::{DateTime, Utc};
use clap::Args;
use lead_scoring::config::AppConfig;
use lead_scoring::error::AppError;
use lead_scoring::scoring::{Factor, LeadRecord, LeadScoringEngine, ScoreResult, ScoreSummary};
use lead_scoring::telemetry;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Lead file to score: `.csv` sheet export or JSON (single lead or array)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print grade, temperature and recommendations for each lead
    #[arg(long)]
    pub(crate) insights: bool,
    /// Evaluate as of this RFC 3339 instant instead of now
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) at: Option<DateTime<Utc>>,
}

pub(crate) async fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        input,
        insights,
        at,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let engine = LeadScoringEngine::new(config.scoring);
    let leads = load_leads(&input)?;
    let now = at.unwrap_or_else(Utc::now);
    let results = engine.batch_calculate_scores_at(&leads, now).await;

    println!("Scored {} leads from {}", leads.len(), input.display());
    for (lead, result) in leads.iter().zip(&results) {
        println!("{}", score_line(lead, result));
        if insights {
            render_insights(&engine, lead, result);
        }
    }

    render_summary(&ScoreSummary::from_results(&results));
    Ok(())
}

fn score_line(lead: &LeadRecord, result: &ScoreResult) -> String {
    let name = lead.full_name();
    let label = if name.is_empty() {
        lead.email.as_str()
    } else {
        name.as_str()
    };

    let model = result
        .model_version
        .as_deref()
        .map(|version| format!(" model {version}"))
        .unwrap_or_default();

    format!(
        "- {label} <{}>: {} ({}{model})",
        lead.email,
        result.value,
        result.method.label()
    )
}

fn render_insights(engine: &LeadScoringEngine, lead: &LeadRecord, result: &ScoreResult) {
    let insights = engine.score_insights(lead, result);
    println!(
        "  grade {} | {}",
        insights.grade.label(),
        insights.temperature.label()
    );
    for factor in &insights.factors {
        match factor {
            Factor::Rule(rule) => {
                println!("    {}: {:.0} x {:.2}", rule.name, rule.score, rule.weight)
            }
            Factor::Model(raw) => println!("    model: {raw}"),
        }
    }
    for recommendation in &insights.recommendations {
        println!(
            "    -> {} ({})",
            recommendation.message, recommendation.action
        );
    }
}

fn render_summary(summary: &ScoreSummary) {
    println!("\nSummary");
    println!(
        "- {} leads | {} ml | {} rule-based | {:.0}% ml coverage",
        summary.total, summary.ml_scored, summary.rule_based, summary.ml_coverage_pct
    );
    println!("- Average score {:.1}", summary.average_score);

    let grades: Vec<String> = summary
        .grade_distribution
        .iter()
        .map(|(grade, count)| format!("{grade}: {count}"))
        .collect();
    println!("- Grades: {}", grades.join(", "));

    let temperatures: Vec<String> = summary
        .temperature_distribution
        .iter()
        .map(|(temperature, count)| format!("{temperature}: {count}"))
        .collect();
    println!("- Temperature: {}", temperatures.join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use lead_scoring::scoring::{ScoringMethod, ScoringWeights};

    #[test]
    fn score_line_prefers_name_and_shows_method() {
        let lead = LeadRecord {
            email: "morgan@globex.com".to_string(),
            first_name: "Morgan".to_string(),
            last_name: "Blake".to_string(),
            ..LeadRecord::default()
        };
        let result = LeadScoringEngine::rules_only(ScoringWeights::default())
            .score_with_rules(&lead);

        let line = score_line(&lead, &result);
        assert!(line.starts_with("- Morgan Blake <morgan@globex.com>: "));
        assert!(line.ends_with("(rule-based)"));
    }

    #[test]
    fn score_line_falls_back_to_email_and_names_model() {
        let lead = LeadRecord {
            email: "anon@initech.com".to_string(),
            ..LeadRecord::default()
        };
        let result = ScoreResult {
            value: 77,
            factors: Vec::new(),
            method: ScoringMethod::Ml,
            model_version: Some("gbm-7".to_string()),
            confidence: None,
        };

        assert_eq!(
            score_line(&lead, &result),
            "- anon@initech.com <anon@initech.com>: 77 (ml model gbm-7)"
        );
    }
}

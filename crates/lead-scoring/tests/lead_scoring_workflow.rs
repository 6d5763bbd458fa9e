use chrono::{TimeZone, Utc};
use lead_scoring::import::LeadCsvImporter;
use lead_scoring::scoring::{
    Grade, LeadRecord, LeadScoringEngine, ScoreSummary, ScoringConfig, ScoringMethod,
    Temperature,
};

const EXPORT: &str = "Email,First Name,Last Name,Phone,Job Title,Company,Industry,Company Size,Revenue,Source,Status,Priority,Budget,Timeline,Decision Maker,Tags,Notes,Created At
morgan@globex.com,Morgan,Blake,555-0110,CEO,Globex,Technology,1000+,$200M+,Referral,Qualified,Critical,$500K+,Immediate,yes,renewal,Champion on board,2025-09-20
riley@gmail.com,Riley,Shaw,,Student,,,,,Cold Call,New,Low,,12+ months,no,,,
";

#[tokio::test]
async fn imported_sheet_scores_end_to_end_without_model() {
    let now = Utc
        .with_ymd_and_hms(2025, 10, 1, 9, 0, 0)
        .single()
        .expect("valid instant");
    let leads = LeadCsvImporter::from_reader(EXPORT.as_bytes()).expect("sheet imports");
    assert_eq!(leads.len(), 2);

    let engine = LeadScoringEngine::new(ScoringConfig::default());
    let results = engine.batch_calculate_scores_at(&leads, now).await;

    assert_eq!(results.len(), 2);
    assert!(results
        .iter()
        .all(|result| result.method == ScoringMethod::RuleBased));
    assert!(results[0].value > results[1].value);

    let hot = engine.score_insights(&leads[0], &results[0]);
    assert_eq!(hot.temperature, Temperature::Hot);
    assert!(matches!(hot.grade, Grade::APlus | Grade::A));

    let summary = ScoreSummary::from_results(&results);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.ml_scored, 0);
    assert_eq!(summary.ml_coverage_pct, 0.0);
}

#[tokio::test]
async fn crm_json_payload_scores_with_defaults_for_missing_fields() {
    let lead: LeadRecord = serde_json::from_str(
        r#"{
            "id": "crm-00042",
            "email": "pat@initech.com",
            "firstName": "Pat",
            "lastName": "Kim",
            "jobTitle": null,
            "company": { "name": "Initech", "industry": "Aerospace" },
            "source": "Website",
            "interactions": [
                { "type": "Demo", "date": "2025-09-28T15:00:00Z", "outcome": "Positive" }
            ],
            "legacyScore": 12
        }"#,
    )
    .expect("payload deserializes");

    let now = Utc
        .with_ymd_and_hms(2025, 10, 1, 9, 0, 0)
        .single()
        .expect("valid instant");
    let engine = LeadScoringEngine::default();
    let first = engine.calculate_lead_score_at(&lead, now).await;
    let second = engine.score_with_rules_at(&lead, now);

    assert_eq!(first.method, ScoringMethod::RuleBased);
    assert_eq!(first.factors.len(), 4);
    assert!(first.value <= 100);
    assert_eq!(first.factors, second.factors);
}

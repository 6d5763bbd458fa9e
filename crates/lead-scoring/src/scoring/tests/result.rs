use serde_json::json;

use crate::scoring::{Factor, ScoreResult};

#[test]
fn score_value_above_100_is_rejected() {
    let err = serde_json::from_value::<ScoreResult>(json!({
        "value": 250, "factors": [], "method": "ml"
    }))
    .expect_err("out-of-range score rejected");

    assert!(err.to_string().contains("outside 0-100"));
}

#[test]
fn rule_shaped_factors_read_back_as_rule_factors() {
    let result: ScoreResult = serde_json::from_value(json!({
        "value": 64,
        "method": "rule-based",
        "factors": [
            { "name": "Demographic", "weight": 0.25, "score": 70 },
            { "factor": "ML Prediction", "points": 90 },
            { "name": "intent", "weight": null, "score": 91 }
        ]
    }))
    .expect("score parses");

    assert_eq!(
        result.factors[0].as_rule().map(|f| f.name.as_str()),
        Some("Demographic")
    );
    assert_eq!(
        result.factors[1],
        Factor::Model(json!({ "factor": "ML Prediction", "points": 90 }))
    );
    assert!(result.factors[2].as_rule().is_none());
    assert!((result.factor_weight_total() - 0.25).abs() < 1e-9);
}

#[test]
fn model_factors_serialize_unchanged() {
    let raw = json!({ "factor": "ML Prediction", "value": "hot", "points": 90 });
    let value = serde_json::to_value(Factor::Model(raw.clone())).expect("serializes");
    assert_eq!(value, raw);
}

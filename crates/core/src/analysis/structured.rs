use crate::analysis::text;
use crate::analysis::{default_risks, DEFAULT_SCORE, MAX_RISK_POINTS};
use crate::domain::analysis::{AnalysisRecord, CriteriaScores, Recommendation};
use crate::domain::contract::AnalysisPayload;
use serde_json::Value;

/// Accepts integers, floats, and numeric strings such as `"82"` or `"82/100"`.
pub fn loose_score(value: &Value) -> Option<u8> {
    match value {
        Value::Number(n) => {
            let f = n.as_f64()?;
            (f >= 0.0).then(|| text::clamp_score(f.round() as u64))
        }
        Value::String(s) => {
            let head = s.trim().split('/').next()?.trim();
            let f = head.parse::<f64>().ok()?;
            (f >= 0.0).then(|| text::clamp_score(f.round() as u64))
        }
        _ => None,
    }
}

const CRITERIA: [&str; 6] = [
    "profitability",
    "financial_strength",
    "valuation",
    "business_quality",
    "growth",
    "dividend_quality",
];

fn loose_strings(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

impl AnalysisPayload {
    fn criterion(&self, name: &str) -> Option<u8> {
        self.criteria_scores
            .as_ref()
            .and_then(|m| m.get(name))
            .and_then(loose_score)
            .or_else(|| self.extra.get(&format!("{name}_score")).and_then(loose_score))
    }

    /// Whether the payload carries a usable score or label. A result whose
    /// fields are all null or unreadable does not count.
    pub fn has_structured_fields(&self) -> bool {
        self.score.as_ref().and_then(loose_score).is_some()
            || self
                .recommendation
                .as_deref()
                .and_then(Recommendation::from_label)
                .is_some()
            || CRITERIA.iter().any(|name| self.criterion(name).is_some())
    }
}

pub fn from_payload(symbol: &str, payload: AnalysisPayload) -> AnalysisRecord {
    let prose = payload.analysis.as_deref().unwrap_or_default();

    let criterion = |name: &str| {
        payload
            .criterion(name)
            .or_else(|| text::score_for(prose, name))
            .unwrap_or(DEFAULT_SCORE)
    };

    let score = payload
        .score
        .as_ref()
        .and_then(loose_score)
        .or_else(|| text::score_for(prose, "overall"))
        .unwrap_or(DEFAULT_SCORE);

    let criteria = CriteriaScores {
        profitability: criterion("profitability"),
        financial_strength: criterion("financial_strength"),
        valuation: criterion("valuation"),
        business_quality: criterion("business_quality"),
        growth: criterion("growth"),
        dividend_quality: criterion("dividend_quality"),
    };

    let recommendation = payload
        .recommendation
        .as_deref()
        .and_then(Recommendation::from_label)
        .unwrap_or_else(|| Recommendation::from_score(score));

    let summary = payload
        .summary
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| text::summary_in(prose));

    let mut reasoning = payload
        .reasoning
        .as_ref()
        .map(loose_strings)
        .unwrap_or_default();
    if reasoning.is_empty() {
        reasoning = text::reasoning_in(prose);
    }
    let reasoning = if reasoning.is_empty() {
        summary.clone().unwrap_or_default()
    } else {
        reasoning.join("\n")
    };

    let mut risks = payload.risks.as_ref().map(loose_strings).unwrap_or_default();
    risks.truncate(MAX_RISK_POINTS);
    if risks.is_empty() {
        risks = if prose.is_empty() {
            default_risks()
        } else {
            text::risks_in(prose)
        };
    }

    AnalysisRecord {
        symbol: symbol.to_string(),
        score,
        criteria,
        recommendation,
        summary,
        reasoning,
        risks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(v: Value) -> AnalysisPayload {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn loose_score_accepts_common_shapes() {
        assert_eq!(loose_score(&json!(82)), Some(82));
        assert_eq!(loose_score(&json!(81.6)), Some(82));
        assert_eq!(loose_score(&json!("90/100")), Some(90));
        assert_eq!(loose_score(&json!(" 70 ")), Some(70));
        assert_eq!(loose_score(&json!(140)), Some(100));
        assert_eq!(loose_score(&json!(-3)), None);
        assert_eq!(loose_score(&json!("n/a")), None);
        assert_eq!(loose_score(&json!(null)), None);
    }

    #[test]
    fn nested_criteria_scores_win() {
        let record = from_payload(
            "AAPL",
            payload(json!({
                "score": 78,
                "recommendation": "Buy",
                "summary": "Great brand.",
                "reasoning": ["Moat", "Buybacks"],
                "risks": ["Regulation"],
                "criteria_scores": {
                    "profitability": 95,
                    "financial_strength": "88",
                    "valuation": 45,
                    "business_quality": 92,
                    "growth": 70,
                    "dividend_quality": 40
                }
            })),
        );
        assert_eq!(record.score, 78);
        assert_eq!(record.recommendation, Recommendation::Buy);
        assert_eq!(record.criteria.financial_strength, 88);
        assert_eq!(record.criteria.dividend_quality, 40);
        assert_eq!(record.reasoning, "Moat\nBuybacks");
        assert_eq!(record.risks, vec!["Regulation"]);
        assert_eq!(record.summary.as_deref(), Some("Great brand."));
    }

    #[test]
    fn flattened_scores_are_read() {
        let record = from_payload(
            "KO",
            payload(json!({
                "score": "66",
                "growth_score": 30,
                "valuation_score": "61"
            })),
        );
        assert_eq!(record.criteria.growth, 30);
        assert_eq!(record.criteria.valuation, 61);
        assert_eq!(record.criteria.profitability, DEFAULT_SCORE);
        // no label: derived from the overall score
        assert_eq!(record.recommendation, Recommendation::Buy);
        assert_eq!(record.risks, default_risks());
    }

    #[test]
    fn all_null_result_is_not_structured() {
        let empty = payload(json!({
            "analysis": null,
            "score": null,
            "recommendation": null,
            "criteria_scores": {"growth": null},
        }));
        assert!(!empty.has_structured_fields());

        assert!(payload(json!({"recommendation": "Sell"})).has_structured_fields());
        assert!(payload(json!({"valuation_score": "40"})).has_structured_fields());
        assert!(!payload(json!({"score": "n/a", "recommendation": "maybe"})).has_structured_fields());
    }

    #[test]
    fn structured_risks_are_capped() {
        let record = from_payload(
            "KO",
            payload(json!({"score": 60, "risks": ["a", "b", "c", "d", "e", "f"]})),
        );
        assert_eq!(record.risks, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn unknown_label_falls_back_to_score() {
        let record = from_payload(
            "XOM",
            payload(json!({"score": 20, "recommendation": "Accumulate"})),
        );
        assert_eq!(record.recommendation, Recommendation::Sell);
    }

    #[test]
    fn prose_fills_missing_fields() {
        let record = from_payload(
            "KO",
            payload(json!({
                "analysis": "Overall score: 71\nDividend quality: 93\n- Steady cash flows\nRisks:\n- Sugar taxes"
            })),
        );
        assert_eq!(record.score, 71);
        assert_eq!(record.criteria.dividend_quality, 93);
        assert_eq!(record.risks, vec!["- Sugar taxes"]);
        assert_eq!(record.reasoning, "- Steady cash flows\n- Sugar taxes");
    }
}

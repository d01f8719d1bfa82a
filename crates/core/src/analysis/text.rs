//! Heuristic reading of free-form analysis prose.

use crate::analysis::{
    default_risks, DEFAULT_SCORE, FALLBACK_SUMMARY, MAX_REASONING_POINTS, MAX_RISK_POINTS,
};
use crate::domain::analysis::{AnalysisRecord, CriteriaScores, Recommendation};
use once_cell::sync::Lazy;
use regex::Regex;

static SCORE_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("overall", r"overall.*?score.*?(\d+)"),
        ("profitability", r"profitability.*?(\d+)"),
        ("financial_strength", r"financial.*?strength.*?(\d+)"),
        ("valuation", r"valuation.*?(\d+)"),
        ("business_quality", r"business.*?quality.*?(\d+)"),
        ("growth", r"growth.*?(\d+)"),
        ("dividend_quality", r"dividend.*?quality.*?(\d+)"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("invalid score pattern")))
    .collect()
});

const REASONING_WORDS: [&str; 5] = ["because", "due to", "strong", "weak", "advantage"];

pub fn score_for(text: &str, name: &str) -> Option<u8> {
    let lower = text.to_lowercase();
    let (_, re) = SCORE_PATTERNS.iter().find(|(n, _)| *n == name)?;
    let digits = re.captures(&lower)?.get(1)?.as_str();
    Some(clamp_score(digits.parse::<u64>().ok()?))
}

pub fn clamp_score(n: u64) -> u8 {
    n.min(100) as u8
}

pub fn recommendation_in(text: &str) -> Recommendation {
    let lower = text.to_lowercase();
    if lower.contains("strong buy") {
        Recommendation::StrongBuy
    } else if lower.contains("buy") {
        Recommendation::Buy
    } else if lower.contains("weak hold") {
        Recommendation::WeakHold
    } else if lower.contains("sell") {
        Recommendation::Sell
    } else {
        Recommendation::Hold
    }
}

fn is_bullet(line: &str) -> bool {
    line.starts_with('-') || line.starts_with('•') || line.starts_with('*')
}

pub fn summary_in(text: &str) -> Option<String> {
    let lines = || text.lines().map(str::trim);
    lines()
        .find(|l| l.to_lowercase().contains("summary") && l.chars().count() > 20)
        .or_else(|| lines().find(|l| l.chars().count() > 50))
        .map(str::to_string)
}

pub fn reasoning_in(text: &str) -> Vec<String> {
    let bullets: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|l| is_bullet(l))
        .map(str::to_string)
        .collect();

    let points = if bullets.is_empty() {
        text.split('.')
            .map(str::trim)
            .filter(|s| {
                let lower = s.to_lowercase();
                REASONING_WORDS.iter().any(|w| lower.contains(w))
            })
            .map(str::to_string)
            .collect()
    } else {
        bullets
    };

    points.into_iter().take(MAX_REASONING_POINTS).collect()
}

/// Up to five bullet lines inside a section that mentions "risk". A
/// non-bullet line without "risk" ends the section.
pub fn risks_in(text: &str) -> Vec<String> {
    let mut risks = Vec::new();
    let mut in_section = false;
    for line in text.lines().map(str::trim) {
        if line.to_lowercase().contains("risk") {
            in_section = true;
            if is_bullet(line) {
                risks.push(line.to_string());
            }
        } else if in_section && is_bullet(line) {
            risks.push(line.to_string());
        } else if in_section && !line.is_empty() {
            in_section = false;
        }
    }

    if risks.is_empty() {
        default_risks()
    } else {
        risks.truncate(MAX_RISK_POINTS);
        risks
    }
}

pub fn from_text(symbol: &str, text: &str) -> AnalysisRecord {
    let score_or_default = |name: &str| score_for(text, name).unwrap_or(DEFAULT_SCORE);

    let reasoning = reasoning_in(text);
    let summary = summary_in(text);
    let reasoning = if reasoning.is_empty() {
        summary.clone().unwrap_or_else(|| text.trim().to_string())
    } else {
        reasoning.join("\n")
    };
    let summary = summary.unwrap_or_else(|| FALLBACK_SUMMARY.to_string());

    AnalysisRecord {
        symbol: symbol.to_string(),
        score: score_or_default("overall"),
        criteria: CriteriaScores {
            profitability: score_or_default("profitability"),
            financial_strength: score_or_default("financial_strength"),
            valuation: score_or_default("valuation"),
            business_quality: score_or_default("business_quality"),
            growth: score_or_default("growth"),
            dividend_quality: score_or_default("dividend_quality"),
        },
        recommendation: recommendation_in(text),
        summary: Some(summary),
        reasoning,
        risks: risks_in(text),
    }
}

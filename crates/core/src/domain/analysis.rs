use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Strong Buy")]
    StrongBuy,
    #[serde(rename = "Buy")]
    Buy,
    #[serde(rename = "Hold")]
    Hold,
    #[serde(rename = "Weak Hold")]
    WeakHold,
    #[serde(rename = "Sell")]
    Sell,
}

impl Recommendation {
    pub fn label(self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "Strong Buy",
            Recommendation::Buy => "Buy",
            Recommendation::Hold => "Hold",
            Recommendation::WeakHold => "Weak Hold",
            Recommendation::Sell => "Sell",
        }
    }

    /// Maps a free-form label onto the vocabulary. Labels the agent may emit
    /// that have no exact counterpart ("Strong Sell") collapse to the closest
    /// member.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label
            .trim()
            .to_ascii_lowercase()
            .replace(['_', '-'], " ");
        match normalized.split_whitespace().collect::<Vec<_>>().join(" ").as_str() {
            "strong buy" => Some(Recommendation::StrongBuy),
            "buy" => Some(Recommendation::Buy),
            "hold" => Some(Recommendation::Hold),
            "weak hold" => Some(Recommendation::WeakHold),
            "sell" | "strong sell" => Some(Recommendation::Sell),
            _ => None,
        }
    }

    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Recommendation::StrongBuy,
            65..=79 => Recommendation::Buy,
            50..=64 => Recommendation::Hold,
            35..=49 => Recommendation::WeakHold,
            _ => Recommendation::Sell,
        }
    }

    pub fn is_buy(self) -> bool {
        matches!(self, Recommendation::StrongBuy | Recommendation::Buy)
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaScores {
    pub profitability: u8,
    pub financial_strength: u8,
    pub valuation: u8,
    pub business_quality: u8,
    pub growth: u8,
    pub dividend_quality: u8,
}

impl CriteriaScores {
    pub fn uniform(score: u8) -> Self {
        Self {
            profitability: score,
            financial_strength: score,
            valuation: score,
            business_quality: score,
            growth: score,
            dividend_quality: score,
        }
    }

    pub fn named(&self) -> [(&'static str, u8); 6] {
        [
            ("profitability", self.profitability),
            ("financial_strength", self.financial_strength),
            ("valuation", self.valuation),
            ("business_quality", self.business_quality),
            ("growth", self.growth),
            ("dividend_quality", self.dividend_quality),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub symbol: String,
    /// Overall score, 0..=100.
    pub score: u8,
    pub criteria: CriteriaScores,
    pub recommendation: Recommendation,
    pub summary: Option<String>,
    pub reasoning: String,
    pub risks: Vec<String>,
}
